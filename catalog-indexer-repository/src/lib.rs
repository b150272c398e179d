//! # Catalog Indexer Repository
//!
//! This crate provides the collaborator traits the indexing pipeline reads
//! product data through, the document sink it writes to, and concrete
//! implementations of both: an in-memory catalog snapshot and a JSON-lines
//! sink.

pub mod errors;
pub mod interfaces;
pub mod jsonl;
pub mod memory;
pub mod types;

pub use errors::{RepositoryError, SinkError};
pub use interfaces::{
    AggregatedPriceCollaborator, AggregatedPriceConfig, CatalogMembershipProvider,
    CategoryHierarchyProvider, ContentLocalizer, DocumentSink, FeatureSetProvider,
    InterfaceDescriptorLookup, InventoryProvider, LocaleConfigProvider, ProductNatureProvider,
    SimplePriceCollaborator,
};
pub use jsonl::JsonLinesSink;
pub use memory::CatalogSnapshot;
pub use types::{
    AggregatedPriceRequest, ContentKind, ParameterDescriptor, ParameterMode, ServiceDescriptor,
    SimplePriceRequest, SimplePriceResult, PRODUCT_ATTRIBUTES_INTERFACE,
};
