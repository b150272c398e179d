//! Dependency initialization and wiring for the catalog indexer.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, instrument, warn};

use super::IndexerConfig;
use crate::IndexingError;
use catalog_indexer_pipeline::{
    CatalogCollaborators, DocumentLoader, LoaderConfig, ProcessorConfig, ProductProcessor,
};
use catalog_indexer_repository::{CatalogSnapshot, DocumentSink, JsonLinesSink};
use catalog_indexer_shared::{product::PRINCIPAL_KEY, RequestContext};

/// Outcome of one indexing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Products processed before the run ended.
    pub products: usize,
    /// Documents accepted by the sink.
    pub documents: usize,
    /// Whether a shutdown signal stopped the run early.
    pub interrupted: bool,
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    snapshot: Arc<CatalogSnapshot>,
    processor: ProductProcessor,
    loader: DocumentLoader,
    context: RequestContext,
    batch_size: usize,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl Dependencies {
    /// Initialize all dependencies from the given configuration.
    ///
    /// Loads the catalog snapshot and opens the output sink.
    pub async fn new(config: &IndexerConfig) -> Result<Self, IndexingError> {
        info!(
            snapshot_path = %config.snapshot_path.display(),
            output_path = ?config.output_path,
            batch_size = config.batch_size,
            schema_interface = %config.schema_interface,
            "Initializing dependencies"
        );

        let snapshot = CatalogSnapshot::load(&config.snapshot_path).await?;

        let sink: Arc<dyn DocumentSink> = match &config.output_path {
            Some(path) => Arc::new(JsonLinesSink::create(path).await?),
            None => Arc::new(JsonLinesSink::stdout()),
        };

        Ok(Self::from_parts(Arc::new(snapshot), sink, config))
    }

    /// Wire dependencies around an already loaded snapshot and sink.
    pub fn from_parts(
        snapshot: Arc<CatalogSnapshot>,
        sink: Arc<dyn DocumentSink>,
        config: &IndexerConfig,
    ) -> Self {
        let batch_size = config.batch_size.max(1);

        let processor = ProductProcessor::with_config(
            CatalogCollaborators::from_backend(snapshot.clone()),
            ProcessorConfig {
                currency: config.currency.clone(),
                store_id: config.store_id.clone(),
                schema_interface: config.schema_interface.clone(),
                ..ProcessorConfig::default()
            },
        );

        let loader = DocumentLoader::with_config(sink, LoaderConfig { batch_size });

        let mut context = RequestContext::new();
        if let Some(user_login) = &config.user_login {
            context = context.with(PRINCIPAL_KEY, serde_json::Value::from(user_login.as_str()));
        }

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        Self {
            snapshot,
            processor,
            loader,
            context,
            batch_size,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Sender that asks a running (or not yet started) run to stop.
    ///
    /// The run finishes the batch in hand, flushes what is buffered and
    /// returns an interrupted summary.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Index every product in the snapshot.
    ///
    /// Products are processed a batch at a time and handed to the loader,
    /// which is flushed once all batches are done. A shutdown signal is only
    /// checked between batches, so no write is ever abandoned halfway.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<RunSummary, IndexingError> {
        let started = Utc::now();
        let total = self.snapshot.products.len();
        info!(products = total, "Starting catalog indexing run");

        let mut processed = 0usize;
        let mut interrupted = false;

        for batch in self.snapshot.products.chunks(self.batch_size) {
            match self.shutdown_rx.try_recv() {
                Ok(()) | Err(TryRecvError::Lagged(_)) => {
                    warn!(processed, remaining = total - processed, "Shutdown requested; stopping run");
                    interrupted = true;
                    break;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => {}
            }

            let documents = self.processor.process_batch(batch, &self.context);
            self.loader.load(documents).await?;
            processed += batch.len();
            tokio::task::yield_now().await;
        }

        self.loader.flush().await?;

        let summary = RunSummary {
            products: processed,
            documents: self.loader.written(),
            interrupted,
        };
        info!(
            products = summary.products,
            documents = summary.documents,
            interrupted = summary.interrupted,
            elapsed_ms = (Utc::now() - started).num_milliseconds(),
            "Catalog indexing run complete"
        );
        Ok(summary)
    }
}
