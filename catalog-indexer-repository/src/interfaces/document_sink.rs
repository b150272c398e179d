//! Document sink trait definition.
//!
//! This module defines the abstract write path that finished documents are
//! handed to, allowing for different backends (search engine, file, mock).

use async_trait::async_trait;

use crate::errors::SinkError;
use catalog_indexer_shared::Document;

/// Abstract write path for finished search documents.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Write a single document.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to write
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written
    /// * `Err(SinkError)` - If the write fails
    async fn write(&self, document: &Document) -> Result<(), SinkError>;

    /// Write several documents in one operation.
    ///
    /// This is more efficient than calling `write` multiple times.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every document was written
    /// * `Err(SinkError::BulkWriteError)` - If any document failed
    async fn bulk_write(&self, documents: &[Document]) -> Result<(), SinkError>;
}
