//! User-visible notifications.
//!
//! Failures of user actions (REST calls) are not retried. They are turned
//! into a transient [`Notification`] carrying the server-supplied message and
//! handed to whatever [`Notifier`] the front end installed.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// A transient message for the user (snackbar/banner/log line).
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            timestamp: now_millis(),
        }
    }
}

/// Returns the current Unix timestamp in milliseconds (0 if the clock is before the epoch).
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Discards notifications.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Writes notifications to the log.
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => log::info!("{}", notification.message),
            Severity::Error => log::error!("{}", notification.message),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;

    /// Records notifications for assertions.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub received: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.received.lock().push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::default();
        notifier.notify(Notification::info("queued"));
        notifier.notify(Notification::error("server said no"));

        let received = notifier.received.lock();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].severity, Severity::Info);
        assert_eq!(received[1].message, "server said no");
        assert!(received[1].timestamp > 0);
    }
}
