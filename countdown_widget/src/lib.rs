//! A countdown widget bound to a host page.
//!
//! The widget reads a deadline from a display element, rewrites the
//! element's text with the remaining `HH:MM:SS` on every tick and submits
//! the quiz form once the deadline has passed.
//!
//! ```no_run
//! # async fn example<P>(page: P) -> Result<(), countdown_widget::WidgetError>
//! # where
//! #     P: countdown_widget::Page + Send + 'static,
//! #     P::Display: Send + 'static,
//! #     P::Form: Send + 'static,
//! # {
//! use countdown_widget::{SystemClock, WidgetOptions, activate};
//!
//! if let Some(handle) =
//!     activate(page, SystemClock, WidgetOptions::default())?
//! {
//!     let expiry = handle.finished().await?;
//!     println!("countdown ended: {expiry:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod clock;
mod deadline;
mod error;
mod format;
mod page;
mod widget;

pub use clock::{Clock, MonotonicClock, SystemClock};
pub use deadline::Deadline;
pub use error::WidgetError;
pub use format::format_remaining;
pub use page::{
    DEADLINE_ATTRIBUTE, DISPLAY_ELEMENT_ID, DisplayElement, FormElement,
    Page, QUIZ_FORM_ID,
};
pub use widget::{
    CountdownHandle, CountdownWidget, Expiry, TickOutcome, WidgetOptions,
    activate,
};
