//! Backend services for activity and participant management.
//!
//! This module provides the service layer abstraction for the activity
//! directory along with an in-memory implementation. Nothing is persisted;
//! the directory is rebuilt from the seed on every start.

pub mod activities;

pub use activities::*;
