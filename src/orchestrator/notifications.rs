use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Info,
    Error
}

/// A message for the user, shown once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level:   NotificationLevel,
    pub title:   String,
    pub message: String
}

impl Notification {
    pub fn info(title: impl ToString, message: impl ToString) -> Self {
        Self { level: NotificationLevel::Info, title: title.to_string(), message: message.to_string() }
    }

    pub fn error(title: impl ToString, message: impl ToString) -> Self {
        Self { level: NotificationLevel::Error, title: title.to_string(), message: message.to_string() }
    }
}

#[derive(Debug, Default)]
pub(crate) struct NotificationQueue(Mutex<Vec<Notification>>);

impl NotificationQueue {
    pub(crate) fn push(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => info!(title = %notification.title, "{}", notification.message),
            NotificationLevel::Error => warn!(title = %notification.title, "{}", notification.message)
        }
        self.0.lock().push(notification);
    }

    pub(crate) fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.0.lock())
    }
}
