//! Document sink error types.

use thiserror::Error;

/// Errors that can occur while writing documents.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Writing to the underlying output failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to serialize a document.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A single document was rejected.
    #[error("Write error: {0}")]
    WriteError(String),

    /// A bulk write had failures.
    #[error("Bulk write error: {0}")]
    BulkWriteError(String),
}

impl SinkError {
    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::WriteError(msg.into())
    }

    /// Create a bulk write error.
    pub fn bulk_write(msg: impl Into<String>) -> Self {
        Self::BulkWriteError(msg.into())
    }
}
