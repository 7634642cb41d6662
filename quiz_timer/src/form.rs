use std::time::Duration;

use countdown_widget::FormElement;
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::page::{FormMethod, FormSpec};

/// Quiz form submitted over HTTP, the way a browser submits a plain form.
#[derive(Debug, Clone)]
pub struct HttpForm {
    client: reqwest::Client,
    spec: FormSpec,
    timeout: Duration,
}

impl HttpForm {
    pub const fn new(
        client: reqwest::Client,
        spec: FormSpec,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            spec,
            timeout,
        }
    }

    /// Send the form fields to the form action. `POST` sends them url
    /// encoded in the body, `GET` in the query string. Redirects are
    /// followed.
    ///
    /// # Errors
    /// If the request could not be sent or no response arrived within
    /// the timeout.
    pub async fn send(&self) -> Result<StatusCode, reqwest::Error> {
        let request = match self.spec.method {
            FormMethod::Post => {
                self.client.post(&self.spec.action).form(&self.spec.fields)
            }
            FormMethod::Get => {
                self.client.get(&self.spec.action).query(&self.spec.fields)
            }
        };

        let response = request.timeout(self.timeout).send().await?;

        Ok(response.status())
    }
}

impl FormElement for HttpForm {
    async fn submit(&mut self) {
        match self.send().await {
            Ok(status) if status.is_success() => {
                info!(%status, "Submitted `{}` to {}", self.spec.id, self.spec.action);
            }
            Ok(status) => {
                warn!(%status, "Submission of `{}` was rejected", self.spec.id);
            }
            Err(e) => {
                warn!("Failed to submit `{}`: {}", self.spec.id, e);
            }
        }
    }
}
