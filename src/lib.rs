//! LRU TTL Cache - An in-process cache with idle and absolute expiry
//!
//! Keys map to values held in recency order. Entries can expire after a
//! period without reads, after a fixed lifetime, or both, and the least
//! recently used entry is evicted when capacity is reached. A single
//! callback per cache is notified of every change.
//!
//! ```
//! use lru_ttl_cache::{Cache, EntryOptions};
//!
//! let mut cache: Cache<&str> = Cache::new();
//! cache.set("one", "1", EntryOptions::new().with_idle_timeout_ms(30_000));
//! assert_eq!(cache.get("one"), Some("1"));
//! assert!(cache.is_recent("one"));
//! ```
//!
//! The `api` module wraps one cache in an HTTP demo host.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{
    Cache, CacheEvent, CacheStats, ClearTarget, Clock, EntryOptions, EventKind, ManualClock,
    SystemClock,
};
pub use config::{CacheConfig, Config};
pub use error::{CacheError, Result};
pub use tasks::spawn_event_logger;
