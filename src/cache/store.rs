//! Cache Store Module
//!
//! The public cache: a key index over the recency-ordered list, with change
//! events and statistics.

use std::fmt;

use tracing::debug;

use crate::cache::{
    pattern_needle, CacheEvent, CacheStats, ClearTarget, Clock, EntryOptions, EventCallback,
    EventKind, KeyIndex, OrderedList, RemovalCause, SystemClock,
};
use crate::config::CacheConfig;
use crate::error::Result;

// == Cache ==
/// LRU cache with per-entry idle and live timeouts.
///
/// Reads promote entries to most recently used; inserts beyond capacity evict
/// the least recently used one. Expiry is evaluated lazily, never on a timer.
pub struct Cache<V, C = SystemClock> {
    id: String,
    index: KeyIndex,
    list: OrderedList<V, C>,
    callback: Option<EventCallback<V>>,
    stats: CacheStats,
}

impl<V: Clone> Cache<V, SystemClock> {
    // == Constructors ==
    /// Creates a cache with the default id and capacity.
    pub fn new() -> Self {
        let config = CacheConfig::default();
        Self::build(config.id, config.capacity, SystemClock)
    }

    /// Creates a cache from explicit configuration.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<V: Clone> Default for Cache<V, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, C: Clock> Cache<V, C> {
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.id, config.capacity, clock))
    }

    fn build(id: String, capacity: usize, clock: C) -> Self {
        Self {
            id,
            index: KeyIndex::new(),
            list: OrderedList::with_clock(capacity, clock).with_removal_records(),
            callback: None,
            stats: CacheStats::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capacity(&self) -> usize {
        self.list.capacity()
    }

    // == Set ==
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// An existing entry is dropped and replaced by a fresh one, so none of
    /// its timeout state survives. Empty keys are ignored.
    pub fn set(&mut self, key: impl Into<String>, value: V, options: EntryOptions) {
        let key = key.into();
        if key.is_empty() {
            return;
        }

        let previous = self.index.remove_key(&key);
        let old_value = previous.and_then(|node| self.list.value_of(node).cloned());
        if let Some(node) = previous {
            self.list.delete(node);
        }

        let new_value = self.callback.is_some().then(|| value.clone());
        let node = self.list.enqueue(value, options);
        self.index.insert(key.clone(), node);
        self.cascade_reclaimed();

        let kind = if previous.is_some() {
            EventKind::Updated
        } else {
            EventKind::Created
        };
        self.emit(|| {
            CacheEvent::new(kind, key)
                .with_old_value(old_value)
                .with_new_value(new_value)
        });
    }

    // == Get ==
    /// Returns the value under `key` and makes it the most recently used.
    ///
    /// An expired entry is removed on the spot and reads as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let Some(node) = self.index.get(key) else {
            self.miss(key);
            return None;
        };

        match self.list.promote(node) {
            Some(promoted) => {
                self.index.insert(key.to_string(), promoted);
                let value = self.list.node(promoted).and_then(|n| n.peek()).cloned();
                self.stats.record_hit();
                let event_value = value.clone();
                self.emit(|| CacheEvent::new(EventKind::Hit, key).with_new_value(event_value));
                value
            }
            None => {
                self.cascade_reclaimed();
                self.miss(key);
                None
            }
        }
    }

    // == Clear ==
    /// Removes the keys selected by `target`. Absent keys are skipped.
    ///
    /// Returns how many of the selected keys were removed. Entries dropped by
    /// the sweep that precedes a keyed clear are not counted.
    pub fn clear(&mut self, target: impl Into<ClearTarget>) -> usize {
        match target.into() {
            ClearTarget::All => {
                let removed: Vec<(String, Option<V>)> = self
                    .index
                    .keys()
                    .into_iter()
                    .map(|key| {
                        let value = match self.callback {
                            Some(_) => self
                                .index
                                .get(&key)
                                .and_then(|node| self.list.value_of(node).cloned()),
                            None => None,
                        };
                        (key, value)
                    })
                    .collect();

                self.list.flush();
                self.index.clear();
                debug!(cache = %self.id, removed = removed.len(), "cache flushed");

                let count = removed.len();
                for (key, value) in removed {
                    self.emit(|| CacheEvent::new(EventKind::Deleted, key).with_old_value(value));
                }
                count
            }
            ClearTarget::Single(key) => {
                self.sweep_expired();
                usize::from(self.remove_key(&key))
            }
            ClearTarget::Pattern(needle) => {
                self.sweep_expired();
                let keys = self.index.keys_containing(&needle);
                debug!(cache = %self.id, pattern = %needle, matched = keys.len(), "clearing by pattern");
                keys.iter().filter(|key| self.remove_key(key)).count()
            }
            ClearTarget::Many(keys) => {
                self.sweep_expired();
                keys.iter().filter(|key| self.remove_key(key)).count()
            }
        }
    }

    // == Limit ==
    /// Changes the capacity; refused when `n` is zero or not above the
    /// current entry count. Returns whether it was applied.
    pub fn limit(&mut self, n: usize) -> bool {
        self.list.limit(n)
    }

    // == Length ==
    /// Number of entries after dropping those whose live timeout elapsed.
    pub fn length(&mut self) -> usize {
        let len = self.list.length();
        self.cascade_reclaimed();
        len
    }

    // == Key Queries ==
    /// Snapshot of all keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.index.keys()
    }

    pub fn has_key(&self, key: &str) -> bool {
        !key.is_empty() && self.index.contains_key(key)
    }

    /// True iff `key` is the next eviction candidate.
    pub fn is_least(&self, key: &str) -> bool {
        self.index
            .get(key)
            .map(|node| self.list.is_tail(node))
            .unwrap_or(false)
    }

    /// True iff `key` is the most recently used entry.
    pub fn is_recent(&self, key: &str) -> bool {
        self.index
            .get(key)
            .map(|node| self.list.is_head(node))
            .unwrap_or(false)
    }

    // == Find ==
    /// Reads every entry whose key contains the pattern's text.
    ///
    /// Only strings with a `*` are patterns; anything else finds nothing.
    /// Each match is read through [`Cache::get`] and so gets promoted.
    pub fn find(&mut self, pattern: &str) -> Vec<V> {
        let Some(needle) = pattern_needle(pattern) else {
            return Vec::new();
        };

        self.index
            .keys_containing(&needle)
            .into_iter()
            .filter_map(|key| self.get(&key))
            .collect()
    }

    // == Events ==
    /// Installs `callback`, replacing any previous one.
    pub fn register_event_callback<F>(&mut self, callback: F)
    where
        F: FnMut(CacheEvent<V>) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    pub fn deregister_event_callback(&mut self) {
        self.callback = None;
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.list.len());
        stats
    }

    // == Internals ==
    fn emit(&mut self, event: impl FnOnce() -> CacheEvent<V>) {
        if let Some(callback) = self.callback.as_mut() {
            callback(event());
        }
    }

    fn miss(&mut self, key: &str) {
        self.stats.record_miss();
        self.emit(|| CacheEvent::new(EventKind::Missed, key));
    }

    fn sweep_expired(&mut self) {
        self.list.sweep();
        self.cascade_reclaimed();
    }

    fn remove_key(&mut self, key: &str) -> bool {
        let Some(node) = self.index.remove_key(key) else {
            return false;
        };
        let old_value = self.list.value_of(node).cloned();
        self.list.delete(node);
        self.emit(|| CacheEvent::new(EventKind::Deleted, key).with_old_value(old_value));
        true
    }

    /// Drops the keys of nodes the list removed on its own.
    fn cascade_reclaimed(&mut self) {
        for reclaimed in self.list.take_reclaimed() {
            match reclaimed.cause {
                RemovalCause::Evicted => self.stats.record_eviction(),
                RemovalCause::Expired => self.stats.record_expiration(),
            }

            if let Some(key) = self.index.remove_node(reclaimed.node) {
                debug!(cache = %self.id, key = %key, cause = ?reclaimed.cause, "key removed");
                let old_value = reclaimed.value;
                self.emit(|| CacheEvent::new(EventKind::Deleted, key).with_old_value(old_value));
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn list(&self) -> &OrderedList<V, C> {
        &self.list
    }
}

impl<V, C: Clock> fmt::Debug for Cache<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("len", &self.list.len())
            .field("capacity", &self.list.capacity())
            .field("has_callback", &self.callback.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}
