//! Background Tasks Module
//!
//! Contains tasks that run alongside the demo server.
//!
//! # Tasks
//! - Event logger: Writes cache change events to the tracing output

mod events;

pub use events::spawn_event_logger;
