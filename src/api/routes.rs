//! API Routes
//!
//! Configures the Axum router with all demo endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, find_handler, get_handler, health_handler, key_status_handler, keys_handler,
    length_handler, limit_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a JSON value with optional timeouts
/// - `GET /get/:key` - Read and promote a value
/// - `DELETE /clear` - Clear everything, one key, a pattern or a key list
/// - `GET /find/:pattern` - Read every value whose key matches a `*` pattern
/// - `GET /keys` - List keys
/// - `GET /keys/:key` - Membership and position of one key
/// - `PUT /limit` - Raise or lower the capacity
/// - `GET /length` - Entry count after dropping dead entries
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/clear", delete(clear_handler))
        .route("/find/:pattern", get(find_handler))
        .route("/keys", get(keys_handler))
        .route("/keys/:key", get(key_status_handler))
        .route("/limit", put(limit_handler))
        .route("/length", get(length_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
