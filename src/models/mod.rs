//! Request and Response models for the cache demo API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ClearKeys, ClearRequest, LimitRequest, SetRequest};
pub use responses::{
    ClearResponse, ErrorResponse, FindResponse, GetResponse, HealthResponse, KeyStatusResponse,
    KeysResponse, LengthResponse, LimitResponse, SetResponse, StatsResponse,
};
