use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Countdown element has no `{attribute}` attribute")]
    MissingDeadline { attribute: String },
    #[error("Countdown deadline is not a valid date: {value:?}")]
    InvalidDeadline { value: String },
    #[error("Countdown was cancelled before it expired")]
    Cancelled,
    #[error("Countdown task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
