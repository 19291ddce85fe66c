//! Notification relay for surfacing success and error messages to the user.
//!
//! The relay is fire-and-forget and holds no state; the presentation layer
//! decides how a notification is actually rendered (toast, alert, ...).

/// Receives user-facing success and error notifications.
pub trait Notifier: Send + Sync {
    /// Show a success message, e.g. after a deposit went through.
    fn success(&self, message: &str);

    /// Show an error message describing a failure category.
    fn error(&self, message: &str);
}

/// A [Notifier] that forwards notifications to the log.
///
/// Stands in for a toast widget when the crate is embedded without a UI.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// A [Notifier] that discards every notification.
#[derive(Debug, Clone, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
