//! Response DTOs for the cache demo API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the CLEAR operation (DELETE /clear)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Number of keys removed
    pub removed: usize,
    /// Keys still present afterwards
    pub remaining: usize,
}

impl ClearResponse {
    pub fn new(removed: usize, remaining: usize) -> Self {
        Self { removed, remaining }
    }
}

/// Response body for the FIND operation (GET /find/:pattern)
#[derive(Debug, Clone, Serialize)]
pub struct FindResponse {
    pub pattern: String,
    pub values: Vec<Value>,
}

impl FindResponse {
    pub fn new(pattern: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            pattern: pattern.into(),
            values,
        }
    }
}

/// Response body for GET /keys
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Response body for the LIMIT operation (PUT /limit)
#[derive(Debug, Clone, Serialize)]
pub struct LimitResponse {
    /// Whether the requested limit replaced the old one
    pub applied: bool,
    /// Capacity in force after the call
    pub capacity: usize,
}

/// Response body for GET /length
#[derive(Debug, Clone, Serialize)]
pub struct LengthResponse {
    pub length: usize,
}

/// Response body for GET /keys/:key
#[derive(Debug, Clone, Serialize)]
pub struct KeyStatusResponse {
    pub key: String,
    /// Key maps to a member
    pub present: bool,
    /// Key maps to the next eviction candidate
    pub least: bool,
    /// Key maps to the most recently used member
    pub recent: bool,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cache namespace
    pub id: String,
    /// Current capacity
    pub capacity: usize,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Number of timeout removals
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(id: impl Into<String>, capacity: usize, stats: &CacheStats) -> Self {
        Self {
            id: id.into(),
            capacity,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", json!({"n": 3}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"key": "test_key", "value": {"n": 3}}));
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("my_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_key_status_serialize() {
        let resp = KeyStatusResponse {
            key: "a".into(),
            present: true,
            least: true,
            recent: false,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["least"], json!(true));
        assert_eq!(json["recent"], json!(false));
    }

    #[test]
    fn test_stats_response_from_stats() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            expirations: 2,
            total_entries: 4,
        };
        let resp = StatsResponse::new("lru", 5, &stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.expirations, 2);
        assert_eq!(resp.id, "lru");
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::new("lru", 5, &CacheStats::new());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
