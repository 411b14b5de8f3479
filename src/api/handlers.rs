//! API Handlers
//!
//! HTTP request handlers for each demo endpoint. Every handler takes the
//! single cache lock for the whole call.

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{Cache, CacheEvent};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearRequest, ClearResponse, FindResponse, GetResponse, HealthResponse, KeyStatusResponse,
    KeysResponse, LengthResponse, LimitRequest, LimitResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
///
/// Reads promote entries, so even lookups mutate the cache; a plain mutex is
/// used instead of a read/write lock.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache holding JSON values
    pub cache: Arc<Mutex<Cache<Value>>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: Cache<Value>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Cache::with_config(config.cache_config())?;
        Ok(Self::new(cache))
    }

    /// Routes cache events into a channel, replacing any callback already
    /// registered.
    pub async fn subscribe_events(&self) -> mpsc::UnboundedReceiver<CacheEvent<Value>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut cache = self.cache.lock().await;
        cache.register_event_callback(move |event| {
            // Receiver gone means nobody is listening any more
            let _ = tx.send(event);
        });
        rx
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value with optional idle and live timeouts.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let options = req.options();
    let mut cache = state.cache.lock().await;
    cache.set(req.key.clone(), req.value, options);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Absent and expired keys are both reported as 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let mut cache = state.cache.lock().await;
    let value = cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /clear
///
/// With no body, or a body without `keys`, everything is cleared.
pub async fn clear_handler(
    State(state): State<AppState>,
    body: Option<Json<ClearRequest>>,
) -> Json<ClearResponse> {
    let target = body.map(|Json(req)| req).unwrap_or_default().target();

    let mut cache = state.cache.lock().await;
    let removed = cache.clear(target);
    let remaining = cache.keys().len();

    Json(ClearResponse::new(removed, remaining))
}

/// Handler for GET /find/:pattern
pub async fn find_handler(
    State(state): State<AppState>,
    Path(pattern): Path<String>,
) -> Json<FindResponse> {
    let mut cache = state.cache.lock().await;
    let values = cache.find(&pattern);

    Json(FindResponse::new(pattern, values))
}

/// Handler for GET /keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let cache = state.cache.lock().await;
    let mut keys = cache.keys();
    keys.sort();

    Json(KeysResponse { keys })
}

/// Handler for PUT /limit
///
/// A refused limit is not an error; the response says whether it applied.
pub async fn limit_handler(
    State(state): State<AppState>,
    Json(req): Json<LimitRequest>,
) -> Json<LimitResponse> {
    let mut cache = state.cache.lock().await;
    let applied = cache.limit(req.limit);

    Json(LimitResponse {
        applied,
        capacity: cache.capacity(),
    })
}

/// Handler for GET /length
pub async fn length_handler(State(state): State<AppState>) -> Json<LengthResponse> {
    let mut cache = state.cache.lock().await;

    Json(LengthResponse {
        length: cache.length(),
    })
}

/// Handler for GET /keys/:key
///
/// Reports membership and position without touching recency.
pub async fn key_status_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<KeyStatusResponse> {
    let cache = state.cache.lock().await;

    Json(KeyStatusResponse {
        present: cache.has_key(&key),
        least: cache.is_least(&key),
        recent: cache.is_recent(&key),
        key,
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.lock().await;
    let stats = cache.stats();

    Json(StatsResponse::new(cache.id(), cache.capacity(), &stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
