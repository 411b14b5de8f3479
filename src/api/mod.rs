//! API Module
//!
//! HTTP handlers and routing for the demo host that exposes one cache.
//!
//! # Endpoints
//! - `PUT /set` - Store a value
//! - `GET /get/:key` - Read a value
//! - `DELETE /clear` - Remove keys
//! - `GET /find/:pattern` - Read values by key pattern
//! - `GET /keys`, `GET /keys/:key` - Key listing and position queries
//! - `PUT /limit`, `GET /length` - Capacity and size
//! - `GET /stats`, `GET /health` - Statistics and liveness

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
