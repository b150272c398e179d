//! Interface definitions for the collaborators of the indexing pipeline.
//!
//! Every lookup the pipeline makes goes through one of these traits so that
//! storage and service backends can be swapped, and mocked in tests.

mod catalog_provider;
mod content_provider;
mod descriptor_lookup;
mod document_sink;
mod price_collaborator;
mod product_provider;

pub use catalog_provider::{CatalogMembershipProvider, CategoryHierarchyProvider};
pub use content_provider::{ContentLocalizer, LocaleConfigProvider};
pub use descriptor_lookup::InterfaceDescriptorLookup;
pub use document_sink::DocumentSink;
pub use price_collaborator::{
    AggregatedPriceCollaborator, AggregatedPriceConfig, SimplePriceCollaborator,
};
pub use product_provider::{FeatureSetProvider, InventoryProvider, ProductNatureProvider};
