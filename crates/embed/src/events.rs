//! Listener registry for query outcomes.
//!
//! Listeners are called synchronously, in registration order, for the
//! event kind they were registered under. There is no unsubscribe.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    QuerySuccess,
    QueryError,
}

impl EventKind {
    /// Event name as used in page scripts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuerySuccess => "querySuccess",
            Self::QueryError => "queryError",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmbedEvent {
    QuerySuccess { query: String, data: Value },
    QueryError { query: String, error: String },
}

impl EmbedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::QuerySuccess { .. } => EventKind::QuerySuccess,
            Self::QueryError { .. } => EventKind::QueryError,
        }
    }
}

type Listener = Arc<dyn Fn(&EmbedEvent) + Send + Sync>;

#[derive(Default)]
pub struct EventRegistry {
    listeners: RwLock<HashMap<EventKind, Vec<Listener>>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&self, kind: EventKind, callback: F)
    where
        F: Fn(&EmbedEvent) + Send + Sync + 'static,
    {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        listeners.entry(kind).or_default().push(Arc::new(callback));
    }

    /// Call every listener registered for the event's kind.
    ///
    /// The listener list is snapshotted first, so a callback may register
    /// further listeners without deadlocking; those run from the next emit.
    pub fn emit(&self, event: &EmbedEvent) {
        let snapshot: Vec<Listener> = {
            let listeners = self
                .listeners
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            listeners.get(&event.kind()).cloned().unwrap_or_default()
        };
        for listener in snapshot {
            listener(event);
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&kind)
            .map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("query_success", &self.listener_count(EventKind::QuerySuccess))
            .field("query_error", &self.listener_count(EventKind::QueryError))
            .finish()
    }
}
