//! The shared library for Mergington, a small sign-up service for school activities.
//!
//! This library provides the pieces shared by the backend and any client of its API:
//! the wire data structures, error types and logging setup.

pub mod data;
pub mod errors;
pub mod log;

pub use serde;
pub use serde_json;
pub use tracing;
