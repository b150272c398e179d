//! # Catalog Indexer Pipeline
//!
//! This crate turns product records into multi-valued, multi-locale search
//! documents and hands them to a document sink.
//!
//! ## Architecture
//!
//! 1. **Resolvers**: Expand category trails, prices and localized text
//! 2. **Processor**: Builds a product's attribute context from its collaborators
//! 3. **Assembler**: Maps the attribute context onto document fields
//! 4. **Loader**: Writes documents to the sink in batches

pub mod assembler;
pub mod attributes;
pub mod errors;
pub mod loader;
pub mod naming;
pub mod processor;
pub mod resolvers;
pub mod schema;

pub use assembler::{DocumentAssembler, LocalizedFieldLayout};
pub use errors::PipelineError;
pub use loader::{DocumentLoader, LoaderConfig};
pub use naming::{FieldNameTable, FieldNameTranslator};
pub use processor::{CatalogCollaborators, ProcessorConfig, ProductProcessor};
pub use schema::SchemaFieldRegistry;
