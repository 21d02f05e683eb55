//! Row store errors

use simpleapp_shim::StubError;
use thiserror::Error;

/// Errors that can occur in row operations
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Invalid row key: {0}")]
    InvalidKey(String),

    #[error("Row {key} already exists")]
    AlreadyExists { key: String },

    #[error("Row {key} not found")]
    NotFound { key: String },

    #[error("Row {key} could not be (de)serialized: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("World state error: {0}")]
    Store(#[from] StubError),
}

impl TableError {
    /// Presence-policy violation (as opposed to a key, codec or store failure)
    pub fn is_presence_violation(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. } | Self::NotFound { .. })
    }
}
