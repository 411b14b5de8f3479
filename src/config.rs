//! Configuration Module
//!
//! Construction-time settings for a cache instance, and the demo server
//! settings loaded from environment variables.

use std::env;

use crate::cache::{DEFAULT_CACHE_ID, DEFAULT_CAPACITY};
use crate::error::{CacheError, Result};

// == Cache Config ==
/// Settings fixed when a cache is built.
///
/// Every instance gets its own copy; nothing is shared between caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Namespace distinguishing independent caches
    pub id: String,
    /// Initial soft bound on live entries
    pub capacity: usize,
}

impl CacheConfig {
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }

    /// Checks that the id is non-empty and the capacity positive.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CacheError::InvalidConfig(
                "cache id cannot be empty".to_string(),
            ));
        }
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_ID, DEFAULT_CAPACITY)
    }
}

// == Server Config ==
/// Demo server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Id of the cache served by the demo
    pub cache_id: String,
    /// Initial cache capacity
    pub capacity: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ID` - Cache namespace (default: "lru")
    /// - `CACHE_CAPACITY` - Initial capacity (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_id: env::var("CACHE_ID")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.cache_id),
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.capacity),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// The cache settings carried by this server config.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(self.cache_id.clone(), self.capacity)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_id: DEFAULT_CACHE_ID.to_string(),
            capacity: DEFAULT_CAPACITY,
            server_port: 3000,
        }
    }
}
