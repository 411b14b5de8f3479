//! Cache Node Module
//!
//! Defines a single cache entry: its value, idle/live expiry metadata and the
//! links that place it inside the ordered list.

// == Node Handle ==
/// Non-owning handle to a node living in an [`OrderedList`](super::OrderedList).
///
/// The generation changes every time the underlying slot is reset, so a handle
/// kept across a delete can never reach the node that later reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) owner: u64,
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

impl NodeRef {
    /// Slot index inside the list arena.
    pub fn index(self) -> usize {
        self.index
    }

    /// Generation of the slot when this handle was issued.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

// == Entry Options ==
/// Per-entry expiry settings supplied on `set`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryOptions {
    idle_timeout_ms: Option<u64>,
    live_timeout_ms: Option<u64>,
}

impl EntryOptions {
    /// Options with no expiry at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options from raw millisecond values, normalizing each one.
    pub fn from_millis(idle_timeout_ms: Option<i64>, live_timeout_ms: Option<i64>) -> Self {
        Self {
            idle_timeout_ms: normalize_timeout(idle_timeout_ms),
            live_timeout_ms: normalize_timeout(live_timeout_ms),
        }
    }

    /// Expire the entry when it goes unread for `ms` milliseconds.
    pub fn with_idle_timeout_ms(mut self, ms: i64) -> Self {
        self.idle_timeout_ms = normalize_timeout(Some(ms));
        self
    }

    /// Expire the entry `ms` milliseconds after creation, regardless of reads.
    pub fn with_live_timeout_ms(mut self, ms: i64) -> Self {
        self.live_timeout_ms = normalize_timeout(Some(ms));
        self
    }

    pub fn idle_timeout_ms(&self) -> Option<u64> {
        self.idle_timeout_ms
    }

    pub fn live_timeout_ms(&self) -> Option<u64> {
        self.live_timeout_ms
    }
}

/// Maps a raw timeout to "configured" or "unset".
///
/// Missing and non-positive values mean no timeout.
pub fn normalize_timeout(ms: Option<i64>) -> Option<u64> {
    ms.filter(|ms| *ms > 0).map(|ms| ms as u64)
}

// == Node ==
/// A cache entry held by the ordered list.
///
/// All timestamps are Unix milliseconds taken from the list's clock.
#[derive(Debug, Clone)]
pub struct Node<V> {
    value: Option<V>,
    idle_timeout_ms: Option<u64>,
    /// Last write or idle-timeout change; `None` when no idle timeout is set
    created_at: Option<u64>,
    live_timeout_ms: Option<u64>,
    /// First time a live timeout was configured; never moved by access
    born_at: Option<u64>,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            value: None,
            idle_timeout_ms: None,
            created_at: None,
            live_timeout_ms: None,
            born_at: None,
            prev: None,
            next: None,
        }
    }
}

impl<V> Node<V> {
    // == Constructor ==
    /// Creates an unlinked node holding `value`.
    pub fn new(value: V, options: EntryOptions, now: u64) -> Self {
        let mut node = Self {
            value: Some(value),
            ..Self::default()
        };
        node.set_idle_timeout(options.idle_timeout_ms(), now);
        node.set_live_timeout(options.live_timeout_ms(), now);
        node
    }

    // == Value ==
    /// Returns the payload as seen at `now`.
    ///
    /// An idle-expired node drops its value here and stays empty afterwards.
    /// A dead node (live timeout elapsed) reads as absent.
    pub fn value(&mut self, now: u64) -> Option<&V> {
        if self.is_idle_expired(now) {
            self.value = None;
        }
        if self.is_dead(now) {
            return None;
        }
        self.value.as_ref()
    }

    /// Same visibility rules as [`Node::value`] without clearing anything.
    pub fn value_at(&self, now: u64) -> Option<&V> {
        if self.is_idle_expired(now) || self.is_dead(now) {
            return None;
        }
        self.value.as_ref()
    }

    /// Raw payload, ignoring expiry.
    pub fn peek(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Rewrites the payload and restarts the idle clock.
    pub fn set_value(&mut self, value: V, now: u64) {
        self.value = Some(value);
        if self.idle_timeout_ms.is_some() {
            self.created_at = Some(now);
        }
    }

    // == Timeouts ==
    /// Configures (or clears, with `None`/zero) the idle timeout.
    pub fn set_idle_timeout(&mut self, ms: Option<u64>, now: u64) {
        self.idle_timeout_ms = ms.filter(|ms| *ms > 0);
        self.created_at = self.idle_timeout_ms.map(|_| now);
    }

    /// Configures (or clears, with `None`/zero) the live timeout.
    ///
    /// `born_at` is recorded the first time only.
    pub fn set_live_timeout(&mut self, ms: Option<u64>, now: u64) {
        self.live_timeout_ms = ms.filter(|ms| *ms > 0);
        self.born_at = match self.live_timeout_ms {
            Some(_) => Some(self.born_at.unwrap_or(now)),
            None => None,
        };
    }

    pub fn idle_timeout_ms(&self) -> Option<u64> {
        self.idle_timeout_ms
    }

    pub fn created_at(&self) -> Option<u64> {
        self.created_at
    }

    pub fn live_timeout_ms(&self) -> Option<u64> {
        self.live_timeout_ms
    }

    pub fn born_at(&self) -> Option<u64> {
        self.born_at
    }

    // == Expiry Checks ==
    /// True once the node has gone unread for longer than its idle timeout.
    pub fn is_idle_expired(&self, now: u64) -> bool {
        match (self.idle_timeout_ms, self.created_at) {
            (Some(idle), Some(created)) => now.saturating_sub(created) > idle,
            _ => false,
        }
    }

    /// True once the live timeout has elapsed. Dead nodes never come back.
    pub fn is_dead(&self, now: u64) -> bool {
        match (self.live_timeout_ms, self.born_at) {
            (Some(live), Some(born)) => now.saturating_sub(born) > live,
            _ => false,
        }
    }

    /// True when the node holds no payload.
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    // == Renew ==
    /// Builds the copy that a promoting read re-inserts at the head.
    ///
    /// Keeps the value and idle timeout with a fresh idle clock. The live
    /// timeout and `born_at` carry over untouched, so reads cannot extend an
    /// absolute deadline.
    pub(crate) fn renew(mut self, now: u64) -> Self {
        let mut node = Self {
            value: self.value.take(),
            live_timeout_ms: self.live_timeout_ms,
            born_at: self.born_at,
            ..Self::default()
        };
        node.set_idle_timeout(self.idle_timeout_ms, now);
        node
    }

    // == Reset ==
    /// Clears the value, links and both timeouts, returning the old value.
    pub fn reset(&mut self) -> Option<V> {
        let value = self.value.take();
        *self = Self::default();
        value
    }
}
