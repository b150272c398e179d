//! Loader module for the catalog indexer pipeline.
//!
//! Loads assembled documents into the document sink.

use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::PipelineError;
use catalog_indexer_repository::DocumentSink;
use catalog_indexer_shared::Document;

/// Configuration for the document loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of documents to batch before flushing.
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

/// Loader that writes documents to the sink.
///
/// The loader is responsible for:
/// - Batching documents for efficient bulk writes
/// - Falling back to single writes when a bulk write fails
pub struct DocumentLoader {
    sink: Arc<dyn DocumentSink>,
    config: LoaderConfig,
    pending_docs: Vec<Document>,
    written: usize,
}

impl DocumentLoader {
    /// Create a new document loader with the given sink.
    pub fn new(sink: Arc<dyn DocumentSink>) -> Self {
        Self::with_config(sink, LoaderConfig::default())
    }

    /// Create a new document loader with custom configuration.
    pub fn with_config(sink: Arc<dyn DocumentSink>, config: LoaderConfig) -> Self {
        let batch_size = config.batch_size.max(1);
        Self {
            sink,
            config: LoaderConfig { batch_size },
            pending_docs: Vec::with_capacity(batch_size),
            written: 0,
        }
    }

    /// Number of documents buffered and not yet flushed.
    pub fn pending(&self) -> usize {
        self.pending_docs.len()
    }

    /// Number of documents written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Load a batch of documents.
    ///
    /// Documents are batched and flushed when the batch size is reached.
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    pub async fn load(&mut self, documents: Vec<Document>) -> Result<(), PipelineError> {
        self.pending_docs.extend(documents);

        if self.pending_docs.len() >= self.config.batch_size {
            self.flush().await?;
        }

        Ok(())
    }

    /// Flush all pending documents to the sink.
    ///
    /// Documents leave the buffer only once the sink has taken them, so a
    /// flush that is dropped mid-write leaves them pending. When the bulk
    /// write is rejected each document is retried on its own; the call fails
    /// if any of them is still rejected.
    #[instrument(skip(self), fields(count = self.pending_docs.len()))]
    pub async fn flush(&mut self) -> Result<(), PipelineError> {
        if self.pending_docs.is_empty() {
            return Ok(());
        }

        let count = self.pending_docs.len();
        info!("Flushing documents to sink");

        let result = self.sink.bulk_write(&self.pending_docs).await;
        let bulk_error = match result {
            Ok(()) => {
                self.pending_docs.clear();
                self.written += count;
                debug!("Bulk write accepted");
                return Ok(());
            }
            Err(e) => e,
        };

        warn!(error = %bulk_error, "Bulk write rejected; retrying documents one by one");

        let mut rejected = 0usize;
        for doc in &self.pending_docs {
            if let Err(e) = self.sink.write(doc).await {
                error!(product_id = ?doc.id(), error = %e, "Document rejected by sink");
                rejected += 1;
            }
        }

        self.pending_docs.clear();
        self.written += count - rejected;
        info!(accepted = count - rejected, rejected = rejected, "Single writes completed");

        if rejected > 0 {
            Err(PipelineError::loader(format!(
                "{} of {} documents rejected by sink",
                rejected, count
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_indexer_repository::SinkError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mock sink for testing.
    struct MockSink {
        written_count: AtomicUsize,
        bulk_calls: AtomicUsize,
        fail_bulk: bool,
        reject_id: Option<&'static str>,
        stall_next_bulk: AtomicBool,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                written_count: AtomicUsize::new(0),
                bulk_calls: AtomicUsize::new(0),
                fail_bulk: false,
                reject_id: None,
                stall_next_bulk: AtomicBool::new(false),
            }
        }

        fn failing_bulk(reject_id: Option<&'static str>) -> Self {
            Self {
                fail_bulk: true,
                reject_id,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl DocumentSink for MockSink {
        async fn write(&self, doc: &Document) -> Result<(), SinkError> {
            if self.reject_id.is_some() && doc.id() == self.reject_id {
                return Err(SinkError::write("rejected"));
            }
            self.written_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn bulk_write(&self, docs: &[Document]) -> Result<(), SinkError> {
            self.bulk_calls.fetch_add(1, Ordering::SeqCst);
            if self.stall_next_bulk.swap(false, Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            if self.fail_bulk {
                return Err(SinkError::bulk_write("bulk rejected"));
            }
            self.written_count.fetch_add(docs.len(), Ordering::SeqCst);
            Ok(())
        }
    }

    fn doc(id: &str) -> Document {
        let mut doc = Document::new();
        doc.add_field("productId", id);
        doc
    }

    #[tokio::test]
    async fn test_load_and_flush() {
        let sink = Arc::new(MockSink::new());
        let mut loader = DocumentLoader::new(sink.clone());

        loader.load(vec![doc("P1"), doc("P2")]).await.unwrap();
        assert_eq!(loader.pending(), 2);
        assert_eq!(sink.written_count.load(Ordering::SeqCst), 0);

        loader.flush().await.unwrap();

        assert_eq!(sink.written_count.load(Ordering::SeqCst), 2);
        assert_eq!(loader.pending(), 0);
        assert_eq!(loader.written(), 2);
    }

    #[tokio::test]
    async fn test_flush_at_batch_size() {
        let sink = Arc::new(MockSink::new());
        let mut loader = DocumentLoader::with_config(sink.clone(), LoaderConfig { batch_size: 2 });

        loader.load(vec![doc("P1")]).await.unwrap();
        assert_eq!(sink.bulk_calls.load(Ordering::SeqCst), 0);

        loader.load(vec![doc("P2"), doc("P3")]).await.unwrap();
        assert_eq!(sink.bulk_calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.written_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_bulk_failure_falls_back_to_single_writes() {
        let sink = Arc::new(MockSink::failing_bulk(None));
        let mut loader = DocumentLoader::new(sink.clone());

        loader.load(vec![doc("P1"), doc("P2")]).await.unwrap();
        loader.flush().await.unwrap();

        assert_eq!(sink.written_count.load(Ordering::SeqCst), 2);
        assert_eq!(loader.written(), 2);
    }

    #[tokio::test]
    async fn test_single_write_failures_are_reported() {
        let sink = Arc::new(MockSink::failing_bulk(Some("P2")));
        let mut loader = DocumentLoader::new(sink.clone());

        loader.load(vec![doc("P1"), doc("P2"), doc("P3")]).await.unwrap();
        let err = loader.flush().await.unwrap_err();

        assert!(matches!(err, PipelineError::LoaderError(_)));
        assert_eq!(sink.written_count.load(Ordering::SeqCst), 2);
        assert_eq!(loader.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_flush_keeps_documents_pending() {
        let sink = Arc::new(MockSink::new());
        sink.stall_next_bulk.store(true, Ordering::SeqCst);
        let mut loader = DocumentLoader::new(sink.clone());

        loader.load(vec![doc("P1"), doc("P2"), doc("P3")]).await.unwrap();
        let abandoned = tokio::time::timeout(Duration::from_millis(50), loader.flush()).await;

        assert!(abandoned.is_err());
        assert_eq!(loader.pending(), 3);
        assert_eq!(loader.written(), 0);

        loader.flush().await.unwrap();

        assert_eq!(sink.written_count.load(Ordering::SeqCst), 3);
        assert_eq!(loader.written(), 3);
        assert_eq!(loader.pending(), 0);
    }

    #[tokio::test]
    async fn test_flush_empty_is_noop() {
        let sink = Arc::new(MockSink::new());
        let mut loader = DocumentLoader::new(sink.clone());
        loader.flush().await.unwrap();
        assert_eq!(sink.bulk_calls.load(Ordering::SeqCst), 0);
    }
}
