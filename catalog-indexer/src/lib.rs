//! # Catalog Indexer
//!
//! Main library for the product catalog search indexer.
//!
//! This crate provides the entry point and configuration for running
//! the indexing pipeline over a catalog snapshot.

pub mod config;

pub use config::{Dependencies, IndexerConfig};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] catalog_indexer_pipeline::PipelineError),

    /// Repository error.
    #[error("Repository error: {0}")]
    RepositoryError(#[from] catalog_indexer_repository::RepositoryError),

    /// Sink error.
    #[error("Sink error: {0}")]
    SinkError(#[from] catalog_indexer_repository::SinkError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
