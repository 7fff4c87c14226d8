//! User-visible feedback: transient toast messages and loading indicators.

use std::time::Duration;

/// How long a toast stays visible unless the caller says otherwise.
pub const DEFAULT_MESSAGE_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub severity: Severity,
    pub duration: Duration,
}

/// Sink for toasts and loading indicators.
///
/// Showing a toast replaces any toast still on screen. `hide_loading` must
/// be safe to call for a container whose loader was never shown.
pub trait Feedback {
    fn show_message(&mut self, text: &str, severity: Severity, duration: Duration);

    fn show_loading(&mut self, container_id: &str);

    fn hide_loading(&mut self, container_id: &str);

    fn success(&mut self, text: &str) {
        self.show_message(text, Severity::Success, DEFAULT_MESSAGE_DURATION);
    }

    fn error(&mut self, text: &str) {
        self.show_message(text, Severity::Error, DEFAULT_MESSAGE_DURATION);
    }
}
