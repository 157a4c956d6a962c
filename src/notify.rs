use log::{info, warn};

/// User-visible notification collaborator. Invoked when the budget alert
/// newly enters the exceeded state; best-effort, and its outcome never
/// affects core state.
pub(crate) trait Notifier {
    /// Returns whether the notification was delivered.
    fn notify(&self, title: &str, body: &str) -> bool;
}

/// Default sink: records the notification in the log file.
pub(crate) struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) -> bool {
        info!("notification: {title}: {body}");
        true
    }
}

/// Report a delivery failure without letting it surface to the caller.
pub(crate) fn notify_best_effort(notifier: &dyn Notifier, title: &str, body: &str) {
    if !notifier.notify(title, body) {
        warn!("notification not delivered: {title}");
    }
}
