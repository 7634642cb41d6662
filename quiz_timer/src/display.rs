use std::collections::HashMap;
use std::io::Write;

use countdown_widget::DisplayElement;
use tracing::warn;

/// Shows the countdown on a single terminal line, rewritten in place.
#[derive(Debug)]
pub struct TerminalDisplay<W> {
    attributes: HashMap<String, String>,
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    pub const fn new(attributes: HashMap<String, String>, out: W) -> Self {
        Self { attributes, out }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplayElement for TerminalDisplay<W> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn set_text(&mut self, text: &str) {
        let result = write!(self.out, "\r{text}").and_then(|()| self.out.flush());

        if let Err(e) = result {
            warn!("Failed to write countdown to the terminal: {}", e);
        }
    }
}
