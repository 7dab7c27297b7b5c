//! Error types for the notification system.

use thiserror::Error;

use crate::join::GroupFailure;

/// Errors that can occur when sending a message to a channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status
    #[error("Webhook returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Errors that can occur when notifying about a task list.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The task list could not be rendered
    #[error("Failed to format task list: {0}")]
    Format(#[from] serde_json::Error),

    /// At least one delivery failed
    #[error("Notification delivery failed")]
    Delivery(#[from] GroupFailure<ChannelError>),
}
