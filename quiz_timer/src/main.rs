use std::num::NonZeroU64;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use countdown_widget::{SystemClock, WidgetOptions, activate};
use qt_app::ContextProvider;
use serde::Deserialize;
use tracing::{error, info};

mod display;
mod error;
mod form;
mod page;
#[cfg(test)]
mod test_support;

use error::Error;
use page::{FormMethod, HostPage, PageDocument};

const ENV_PREFIX: &str = "QUIZ_TIMER_";

#[derive(Debug, Clone, Deserialize)]
struct Config {
    /// JSON page document; takes precedence over `deadline`/`submit_url`.
    page_file: Option<PathBuf>,
    deadline: Option<String>,
    submit_url: Option<String>,
    #[serde(default)]
    submit_method: FormMethod,
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: NonZeroU64,
    /// How long the form submission may take before it is abandoned.
    #[serde(default = "default_submit_timeout_ms")]
    submit_timeout_ms: NonZeroU64,
}

// both evaluated at compile time
const DEFAULT_TICK_INTERVAL_MS: NonZeroU64 = NonZeroU64::new(500).unwrap();
const DEFAULT_SUBMIT_TIMEOUT_MS: NonZeroU64 = NonZeroU64::new(10_000).unwrap();

const fn default_tick_interval_ms() -> NonZeroU64 {
    DEFAULT_TICK_INTERVAL_MS
}

const fn default_submit_timeout_ms() -> NonZeroU64 {
    DEFAULT_SUBMIT_TIMEOUT_MS
}

#[derive(Debug, Clone)]
struct AppContext {
    config: Config,
    client: reqwest::Client,
}

impl ContextProvider<Config> for AppContext {
    async fn new(config: Config) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

async fn load_document(config: &Config) -> Result<PageDocument, Error> {
    let Some(path) = &config.page_file else {
        return Ok(PageDocument::from_parts(
            config.deadline.as_deref(),
            config.submit_url.as_deref(),
            config.submit_method,
        ));
    };

    let contents = tokio::fs::read_to_string(path).await.map_err(|source| {
        Error::PageFile {
            path: path.clone(),
            source,
        }
    })?;

    Ok(serde_json::from_str(&contents)?)
}

async fn run(context: AppContext) -> Result<(), Error> {
    let document = load_document(&context.config).await?;
    let page = HostPage::new(
        document,
        context.client,
        Duration::from_millis(context.config.submit_timeout_ms.get()),
    );
    let options = WidgetOptions {
        tick_interval: Duration::from_millis(
            context.config.tick_interval_ms.get(),
        ),
        ..WidgetOptions::default()
    };

    let Some(handle) = activate(page, SystemClock, options)? else {
        info!("Page has no countdown, nothing to do");
        return Ok(());
    };

    let expiry = handle.finished().await?;
    // end the countdown line
    println!();
    info!(?expiry, "Countdown finished");

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let result = match qt_app::create_app_context::<AppContext, Config>(
        ENV_PREFIX,
    )
    .await
    {
        Ok(context) => run(context).await,
        Err(e) => Err(e.into()),
    };

    exit_code(&result)
}

fn exit_code(result: &Result<(), Error>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
