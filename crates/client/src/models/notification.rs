//! In-app notifications.
//!
//! Notifications are produced locally by the frontends (there is no backend
//! endpoint for them) and held by [`crate::views::NotificationCenter`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    /// Error and warning notifications count as alerts.
    pub fn is_alert(self) -> bool {
        matches!(self, Self::Error | Self::Warning)
    }
}

/// What area of the application a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Connection,
    Query,
    Security,
    Feature,
    Usage,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub category: NotificationCategory,
}

impl Notification {
    /// A new unread notification stamped with the current time.
    pub fn new(
        kind: NotificationKind,
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp: Utc::now(),
            read: false,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unread_with_unique_id() {
        let a = Notification::new(
            NotificationKind::Info,
            NotificationCategory::System,
            "Hello",
            "World",
        );
        let b = Notification::new(
            NotificationKind::Info,
            NotificationCategory::System,
            "Hello",
            "World",
        );
        assert!(!a.read);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_alert_kinds() {
        assert!(NotificationKind::Error.is_alert());
        assert!(NotificationKind::Warning.is_alert());
        assert!(!NotificationKind::Success.is_alert());
        assert!(!NotificationKind::Info.is_alert());
    }
}
