//! Processor module for the catalog indexer pipeline.
//!
//! Transforms product records into search documents.

mod collaborators;
mod product_processor;

pub use collaborators::CatalogCollaborators;
pub use product_processor::{ProcessorConfig, ProductProcessor};
