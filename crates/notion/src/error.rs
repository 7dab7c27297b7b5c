//! Error types for the Notion client.

use thiserror::Error;

/// Errors that can occur when querying a Notion database.
#[derive(Debug, Error)]
pub enum NotionError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Notion returned a non-success status
    #[error("Notion API error: {status} {code} - {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A query result was a partial object instead of a full page
    #[error("Unexpected record shape: {object} {id} is not a full page")]
    UnexpectedRecordShape { object: String, id: String },
}
