//! Error taxonomy for digest and mover runs.

use std::path::PathBuf;

use notify::join::GroupFailure;
use notify::NotifyError;
use notion::NotionError;
use thiserror::Error;

/// Errors that abort a run. None of them are recovered from.
#[derive(Debug, Error)]
pub enum DigestError {
    /// A required environment variable is missing or empty
    #[error("{0} is not provided in the environment variables")]
    MissingConfiguration(&'static str),

    /// The Notion database query failed
    #[error("Task source query failed")]
    SourceQuery(#[source] NotionError),

    /// The query returned something other than a full page
    #[error("Unexpected record shape: {object} {id} is not a full page")]
    UnexpectedRecordShape { object: String, id: String },

    /// A webhook delivery failed
    #[error("Failed to deliver task digest")]
    Delivery(#[from] NotifyError),

    /// The mover settings file could not be read
    #[error("Failed to read settings from {path}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mover settings file is not valid
    #[error("Invalid settings in {path}")]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// At least one page update failed
    #[error("Failed to move stale tasks")]
    PageUpdate(#[source] GroupFailure<NotionError>),
}

impl From<NotionError> for DigestError {
    fn from(err: NotionError) -> Self {
        match err {
            NotionError::UnexpectedRecordShape { object, id } => {
                Self::UnexpectedRecordShape { object, id }
            }
            other => Self::SourceQuery(other),
        }
    }
}
