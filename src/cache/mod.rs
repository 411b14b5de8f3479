//! Cache Module
//!
//! In-process LRU cache with idle and live expiry, bounded capacity and
//! change events.

mod clock;
mod event;
mod index;
mod list;
mod node;
mod stats;
mod store;
mod target;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use event::{CacheEvent, EventCallback, EventKind};
pub use index::KeyIndex;
pub use list::{OrderedList, Reclaimed, RemovalCause};
pub use node::{normalize_timeout, EntryOptions, Node, NodeRef};
pub use stats::CacheStats;
pub use store::Cache;
pub use target::{pattern_needle, ClearTarget};

// == Public Constants ==
/// Id given to a cache built without explicit configuration
pub const DEFAULT_CACHE_ID: &str = "lru";

/// Capacity given to a cache built without explicit configuration
pub const DEFAULT_CAPACITY: usize = 5;
