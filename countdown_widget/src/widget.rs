use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::{
    Clock, DEADLINE_ATTRIBUTE, DISPLAY_ELEMENT_ID, Deadline, DisplayElement,
    FormElement, Page, QUIZ_FORM_ID, WidgetError, format_remaining,
};

/// Where the widget finds its elements and how often it ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub display_id: String,
    pub deadline_attribute: String,
    pub form_id: String,
    pub tick_interval: Duration,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            display_id: DISPLAY_ELEMENT_ID.to_string(),
            deadline_attribute: DEADLINE_ATTRIBUTE.to_string(),
            form_id: QUIZ_FORM_ID.to_string(),
            tick_interval: Duration::from_millis(500),
        }
    }
}

/// How the countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// The form was found and submitted.
    Submitted,
    /// No form was on the page at expiry.
    FormMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time is left; the next tick is due after the tick interval.
    Continue { remaining_ms: u64 },
    /// The deadline has passed and the loop is over.
    Expired(Expiry),
}

/// Countdown bound to one display element of a page.
///
/// Holds the display element and the deadline read from it. The form is
/// looked up only at expiry, so it may be added to the page later.
pub struct CountdownWidget<P: Page, C> {
    page: P,
    display: P::Display,
    clock: C,
    deadline: Deadline,
    options: WidgetOptions,
    expiry: Option<Expiry>,
}

impl<P: Page, C: Clock> CountdownWidget<P, C> {
    /// Bind the widget to the page's display element.
    ///
    /// Returns `Ok(None)` when the page has no display element: such pages
    /// simply have no countdown.
    ///
    /// # Errors
    /// `WidgetError::MissingDeadline` or `WidgetError::InvalidDeadline` if
    /// the element does not carry a usable deadline. Nothing is rendered
    /// in that case.
    pub fn attach(
        page: P,
        clock: C,
        options: WidgetOptions,
    ) -> Result<Option<Self>, WidgetError> {
        let Some(display) = page.display(&options.display_id) else {
            debug!(
                "No `{}` element on the page, countdown not started",
                options.display_id
            );
            return Ok(None);
        };

        let deadline = read_deadline(&display, &options.deadline_attribute)
            .inspect_err(|e| error!("Countdown not started: {}", e))?;

        info!(deadline_ms = deadline.as_millis(), "Countdown attached");

        Ok(Some(Self {
            page,
            display,
            clock,
            deadline,
            options,
            expiry: None,
        }))
    }

    pub const fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub const fn is_expired(&self) -> bool {
        self.expiry.is_some()
    }

    /// Render the remaining time and, on the first tick at or past the
    /// deadline, submit the form.
    ///
    /// Once expired, further ticks change nothing and report the same
    /// expiry, so the form is submitted at most once.
    pub async fn tick(&mut self) -> TickOutcome {
        if let Some(expiry) = self.expiry {
            return TickOutcome::Expired(expiry);
        }

        let remaining_ms = self.deadline.remaining_ms(self.clock.now_ms());
        self.display.set_text(&format_remaining(remaining_ms));
        debug!(remaining_ms, "Countdown tick");

        if remaining_ms > 0 {
            return TickOutcome::Continue { remaining_ms };
        }

        let form = self.page.form(&self.options.form_id);
        let expiry = if form.is_some() {
            Expiry::Submitted
        } else {
            Expiry::FormMissing
        };
        self.expiry = Some(expiry);

        match form {
            Some(mut form) => {
                info!(
                    "Deadline reached, submitting `{}`",
                    self.options.form_id
                );
                form.submit().await;
            }
            None => {
                info!(
                    "Deadline reached, no `{}` form to submit",
                    self.options.form_id
                );
            }
        }

        TickOutcome::Expired(expiry)
    }

    /// Tick until the deadline passes, sleeping the tick interval after
    /// each tick.
    pub async fn run(mut self) -> Expiry {
        loop {
            match self.tick().await {
                TickOutcome::Continue { .. } => {
                    tokio::time::sleep(self.options.tick_interval).await;
                }
                TickOutcome::Expired(expiry) => return expiry,
            }
        }
    }
}

impl<P, C> CountdownWidget<P, C>
where
    P: Page + Send + 'static,
    P::Display: Send + 'static,
    P::Form: Send + 'static,
    C: Clock + Send + 'static,
{
    /// Run the tick loop as a tokio task.
    #[must_use]
    pub fn spawn(self) -> CountdownHandle {
        CountdownHandle {
            task: tokio::spawn(self.run()),
        }
    }
}

fn read_deadline<D: DisplayElement>(
    display: &D,
    attribute: &str,
) -> Result<Deadline, WidgetError> {
    let value = display.attribute(attribute).ok_or_else(|| {
        WidgetError::MissingDeadline {
            attribute: attribute.to_string(),
        }
    })?;

    Deadline::parse(&value)
}

/// A running countdown.
#[derive(Debug)]
pub struct CountdownHandle {
    task: JoinHandle<Expiry>,
}

impl CountdownHandle {
    /// Stop the countdown. The form is not submitted unless the deadline
    /// was already reached.
    pub fn cancel(&self) {
        self.task.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the countdown to end.
    ///
    /// # Errors
    /// `WidgetError::Cancelled` if the countdown was cancelled first,
    /// `WidgetError::Task` if the task panicked.
    pub async fn finished(self) -> Result<Expiry, WidgetError> {
        match self.task.await {
            Ok(expiry) => Ok(expiry),
            Err(e) if e.is_cancelled() => Err(WidgetError::Cancelled),
            Err(e) => Err(e.into()),
        }
    }
}

/// Page-ready entry point: attach to `page` and start ticking.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
/// See [`CountdownWidget::attach`].
pub fn activate<P, C>(
    page: P,
    clock: C,
    options: WidgetOptions,
) -> Result<Option<CountdownHandle>, WidgetError>
where
    P: Page + Send + 'static,
    P::Display: Send + 'static,
    P::Form: Send + 'static,
    C: Clock + Send + 'static,
{
    Ok(CountdownWidget::attach(page, clock, options)?.map(CountdownWidget::spawn))
}
