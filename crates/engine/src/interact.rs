//! Host-UI capabilities injected into every operation.

/// Notification, picker, and input primitives supplied by the host surface.
///
/// The engine never talks to a terminal directly; everything user-facing
/// arrives through this trait so the operations stay testable headless. A
/// dismissed picker or prompt is a normal outcome (`None`), never an error.
pub trait Interact {
    /// Show an informational notice.
    fn notify(&self, message: &str);

    /// Show an error notice.
    fn notify_error(&self, message: &str);

    /// Show a prominent multi-line error report. Hosts without a modal
    /// surface may render it like [`Interact::notify_error`].
    fn notify_error_modal(&self, message: &str);

    /// Offer a single choice among `labels`. Returns the chosen label, or
    /// `None` when the user dismissed the picker.
    fn pick(&self, placeholder: &str, labels: &[String]) -> Option<String>;

    /// Prompt for free text, pre-filled with `initial`. Returns the entered
    /// text, or `None` when the user dismissed the prompt.
    fn input(&self, prompt: &str, title: &str, initial: &str) -> Option<String>;
}
