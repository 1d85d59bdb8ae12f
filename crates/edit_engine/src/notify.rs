//! Notification sink for user-facing messages

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Error,
}

/// Fire-and-forget destination for user-visible messages
pub trait Notifier {
    fn notify(&mut self, message: &str, kind: NotificationKind);
}

/// Notifier that keeps every message, in order
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<(String, NotificationKind)>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&(String, NotificationKind)> {
        self.messages.last()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        self.messages.push((message.to_string(), kind));
    }
}

/// Notifier that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Info => tracing::info!("{}", message),
            NotificationKind::Error => tracing::warn!("{}", message),
        }
    }
}
