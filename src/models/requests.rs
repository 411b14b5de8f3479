//! Request DTOs for the cache demo API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::{ClearTarget, EntryOptions};

/// Longest key accepted over HTTP
pub const MAX_KEY_LEN: usize = 256;

/// Request body for the SET operation (PUT /set)
///
/// Timeouts are in milliseconds. Zero or negative values mean "no timeout".
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// Any JSON value
    pub value: Value,
    /// Optional idle timeout, renewed by every read
    #[serde(default)]
    pub idle_timeout_ms: Option<i64>,
    /// Optional absolute timeout counted from the first store
    #[serde(default)]
    pub live_timeout_ms: Option<i64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LEN {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LEN
            ));
        }
        None
    }

    pub fn options(&self) -> EntryOptions {
        EntryOptions::from_millis(self.idle_timeout_ms, self.live_timeout_ms)
    }
}

/// Keys named by a clear request: one key-or-pattern, or a list of literal keys
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClearKeys {
    One(String),
    Many(Vec<String>),
}

/// Request body for the CLEAR operation (DELETE /clear)
///
/// A missing body or a missing `keys` field clears everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub keys: Option<ClearKeys>,
}

impl ClearRequest {
    pub fn target(self) -> ClearTarget {
        match self.keys {
            None => ClearTarget::All,
            Some(ClearKeys::One(key)) => ClearTarget::parse(&key),
            Some(ClearKeys::Many(keys)) => ClearTarget::Many(keys),
        }
    }
}

/// Request body for the LIMIT operation (PUT /limit)
#[derive(Debug, Clone, Deserialize)]
pub struct LimitRequest {
    pub limit: usize,
}
