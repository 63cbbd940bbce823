//! Shared error types and utilities for the mergington project.
pub use color_eyre::Report;
pub use color_eyre::eyre::{WrapErr, eyre};

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Failed to install color_eyre")]
    ColorEyre(#[from] color_eyre::Report),
    #[error("Failed to install tracing-subscriber")]
    TracingSubscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Rejections produced by the activity directory.
///
/// The `Display` output is the human-readable detail returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("{email} is already signed up for {activity}")]
    AlreadySignedUp { activity: String, email: String },
    #[error("{email} is not signed up for {activity}")]
    NotSignedUp { activity: String, email: String },
}

impl ActivityError {
    /// Whether the rejection means the target does not exist, as opposed to a conflict.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ActivityNotFound | Self::NotSignedUp { .. })
    }
}
