//! Error types for the catalog indexer pipeline.

use catalog_indexer_repository::SinkError;
use thiserror::Error;

/// Errors that can occur in the catalog indexer pipeline.
///
/// Collaborator failures while enriching a single product never surface
/// here; they are logged and the partial document is kept.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the loader component.
    #[error("Loader error: {0}")]
    LoaderError(String),

    /// Error from the document sink.
    #[error("Sink error: {0}")]
    SinkError(#[from] SinkError),
}

impl PipelineError {
    /// Create a loader error.
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::LoaderError(msg.into())
    }
}
