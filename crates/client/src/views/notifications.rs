//! Local notification center.
//!
//! Notifications are produced by the frontends themselves (query results,
//! connection changes) and never leave the process.

use uuid::Uuid;

use crate::models::{Notification, NotificationCategory, NotificationKind};

/// Filter tabs of the notification view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    /// Errors and warnings.
    Alerts,
    Queries,
    Connections,
}

impl NotificationFilter {
    pub const ALL: [NotificationFilter; 5] = [
        Self::All,
        Self::Unread,
        Self::Alerts,
        Self::Queries,
        Self::Connections,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Unread => "Unread",
            Self::Alerts => "Alerts",
            Self::Queries => "Queries",
            Self::Connections => "Connections",
        }
    }

    pub fn matches(self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.read,
            Self::Alerts => notification.kind.is_alert(),
            Self::Queries => notification.category == NotificationCategory::Query,
            Self::Connections => notification.category == NotificationCategory::Connection,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Unread,
            Self::Unread => Self::Alerts,
            Self::Alerts => Self::Queries,
            Self::Queries => Self::Connections,
            Self::Connections => Self::All,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::All => Self::Connections,
            Self::Unread => Self::All,
            Self::Alerts => Self::Unread,
            Self::Queries => Self::Alerts,
            Self::Connections => Self::Queries,
        }
    }
}

/// Newest-first list of notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification at the top. Returns its id.
    pub fn push(&mut self, notification: Notification) -> Uuid {
        let id = notification.id;
        self.items.insert(0, notification);
        id
    }

    /// Shorthand for building and pushing an unread notification.
    pub fn notify(
        &mut self,
        kind: NotificationKind,
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Uuid {
        self.push(Notification::new(kind, category, title, message))
    }

    pub fn mark_read(&mut self, id: Uuid) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.items {
            n.read = true;
        }
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    pub fn filtered(&self, filter: NotificationFilter) -> Vec<&Notification> {
        self.items.iter().filter(|n| filter.matches(n)).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn alert_count(&self) -> usize {
        self.items.iter().filter(|n| n.kind.is_alert()).count()
    }
}
