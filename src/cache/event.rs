//! Cache Event Module
//!
//! Change notifications pushed to the single registered callback.

use std::fmt;

use serde::Serialize;

// == Event Kind ==
/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A new key was stored
    Created,
    /// An existing key got a new value
    Updated,
    /// A read found a value
    Hit,
    /// A read found nothing (absent key or expired value)
    Missed,
    /// A key left the cache (clear, eviction or expiry)
    Deleted,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 5] = [
        EventKind::Created,
        EventKind::Updated,
        EventKind::Hit,
        EventKind::Missed,
        EventKind::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Created => "CREATED",
            EventKind::Updated => "UPDATED",
            EventKind::Hit => "HIT",
            EventKind::Missed => "MISSED",
            EventKind::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Cache Event ==
/// Payload delivered with every event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEvent<V> {
    pub kind: EventKind,
    pub key: String,
    pub old_value: Option<V>,
    pub new_value: Option<V>,
}

impl<V> CacheEvent<V> {
    pub fn new(kind: EventKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            old_value: None,
            new_value: None,
        }
    }

    pub fn with_old_value(mut self, value: Option<V>) -> Self {
        self.old_value = value;
        self
    }

    pub fn with_new_value(mut self, value: Option<V>) -> Self {
        self.new_value = value;
        self
    }
}

/// Callback registered on a cache. At most one is active per cache.
pub type EventCallback<V> = Box<dyn FnMut(CacheEvent<V>) + Send>;
