/// Identifier of the element that carries the deadline and shows the
/// countdown.
pub const DISPLAY_ELEMENT_ID: &str = "countdown";

/// Attribute on the display element holding the deadline string.
pub const DEADLINE_ATTRIBUTE: &str = "data-deadline";

/// Identifier of the form submitted when the countdown expires.
pub const QUIZ_FORM_ID: &str = "quiz-form";

/// Element whose text shows the countdown.
pub trait DisplayElement {
    /// Value of the named attribute, if the element has it.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Replace the element's entire text content.
    fn set_text(&mut self, text: &str);
}

/// Form submitted as the terminal action.
pub trait FormElement {
    /// Perform the host's native submission.
    ///
    /// There is no feedback channel: implementations deal with their own
    /// failures.
    fn submit(&mut self) -> impl Future<Output = ()> + Send;
}

/// Capability to resolve elements of a host page by identifier.
///
/// Hosts implement this instead of the widget reaching into global page
/// state, so a page can be any document, terminal or test double.
pub trait Page {
    type Display: DisplayElement;
    type Form: FormElement;

    fn display(&self, id: &str) -> Option<Self::Display>;

    fn form(&self, id: &str) -> Option<Self::Form>;
}
