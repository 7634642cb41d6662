use std::collections::{BTreeMap, HashMap};
use std::io::{self, Stdout};
use std::time::Duration;

use countdown_widget::{DEADLINE_ATTRIBUTE, DISPLAY_ELEMENT_ID, Page, QUIZ_FORM_ID};
use serde::Deserialize;

use crate::display::TerminalDisplay;
use crate::form::HttpForm;

/// A host page described as JSON, elements addressed by `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageDocument {
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Display {
        id: String,
        #[serde(default)]
        attributes: HashMap<String, String>,
    },
    Form(FormSpec),
}

impl Element {
    fn id(&self) -> &str {
        match self {
            Self::Display { id, .. } => id,
            Self::Form(form) => &form.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormSpec {
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub method: FormMethod,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMethod {
    #[default]
    #[serde(alias = "POST")]
    Post,
    #[serde(alias = "GET")]
    Get,
}

impl PageDocument {
    /// Page with the standard countdown element and quiz form, each only
    /// present when its value is given.
    pub fn from_parts(
        deadline: Option<&str>,
        submit_url: Option<&str>,
        method: FormMethod,
    ) -> Self {
        let display = deadline.map(|deadline| Element::Display {
            id: DISPLAY_ELEMENT_ID.to_string(),
            attributes: HashMap::from([(
                DEADLINE_ATTRIBUTE.to_string(),
                deadline.to_string(),
            )]),
        });
        let form = submit_url.map(|action| {
            Element::Form(FormSpec {
                id: QUIZ_FORM_ID.to_string(),
                action: action.to_string(),
                method,
                fields: BTreeMap::new(),
            })
        });

        Self {
            elements: display.into_iter().chain(form).collect(),
        }
    }

    /// First element with the given id, like `getElementById`.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn display_attributes(
        &self,
        id: &str,
    ) -> Option<&HashMap<String, String>> {
        match self.element(id)? {
            Element::Display { attributes, .. } => Some(attributes),
            Element::Form(_) => None,
        }
    }

    pub fn form(&self, id: &str) -> Option<&FormSpec> {
        match self.element(id)? {
            Element::Form(form) => Some(form),
            Element::Display { .. } => None,
        }
    }
}

/// The document bound to the terminal and an HTTP client.
#[derive(Debug, Clone)]
pub struct HostPage {
    document: PageDocument,
    client: reqwest::Client,
    submit_timeout: Duration,
}

impl HostPage {
    pub const fn new(
        document: PageDocument,
        client: reqwest::Client,
        submit_timeout: Duration,
    ) -> Self {
        Self {
            document,
            client,
            submit_timeout,
        }
    }
}

impl Page for HostPage {
    type Display = TerminalDisplay<Stdout>;
    type Form = HttpForm;

    fn display(&self, id: &str) -> Option<Self::Display> {
        self.document
            .display_attributes(id)
            .map(|attributes| TerminalDisplay::new(attributes.clone(), io::stdout()))
    }

    fn form(&self, id: &str) -> Option<Self::Form> {
        self.document
            .form(id)
            .map(|spec| {
                HttpForm::new(self.client.clone(), spec.clone(), self.submit_timeout)
            })
    }
}
