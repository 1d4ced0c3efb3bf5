//! User-facing notifications.
//!
//! The dashboard surfaces failures and confirmations as short notifications. The
//! adapter raises them; the shell decides how they are shown.

use std::sync::Mutex;

use uuid::Uuid;

/// Message shown for any server failure (status >= 500).
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

/// Message shown when no response was received at all.
pub const UNREACHABLE_MESSAGE: &str = "Unable to reach the server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Keeps every notification so the shell can display them later.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        log_notification(&notification);
        self.lock().push(notification);
    }
}

fn log_notification(notification: &Notification) {
    match notification.level {
        Level::Error => tracing::warn!(id = %notification.id, "notify: {}", notification.message),
        Level::Success | Level::Info => {
            tracing::info!(id = %notification.id, "notify: {}", notification.message)
        }
    }
}
