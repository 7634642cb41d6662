use std::path::PathBuf;

use countdown_widget::WidgetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),
    #[error("Failed to read page file {}: {source}", .path.display())]
    PageFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse page file: {0}")]
    PageJson(#[from] serde_json::Error),
    #[error(transparent)]
    Widget(#[from] WidgetError),
}

impl From<figment::Error> for Error {
    fn from(e: figment::Error) -> Self {
        Self::Config(Box::new(e))
    }
}
