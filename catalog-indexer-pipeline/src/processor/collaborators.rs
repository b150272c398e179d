//! The set of collaborators a product processor reads through.

use std::sync::Arc;

use catalog_indexer_repository::{
    AggregatedPriceCollaborator, CatalogMembershipProvider, CategoryHierarchyProvider, ContentLocalizer, FeatureSetProvider, InterfaceDescriptorLookup,
    InventoryProvider, LocaleConfigProvider, ProductNatureProvider, SimplePriceCollaborator,
};

/// Every external lookup the pipeline depends on.
#[derive(Clone)]
pub struct CatalogCollaborators {
    pub hierarchy: Arc<dyn CategoryHierarchyProvider>,
    pub catalogs: Arc<dyn CatalogMembershipProvider>,
    pub features: Arc<dyn FeatureSetProvider>,
    pub inventory: Arc<dyn InventoryProvider>,
    pub nature: Arc<dyn ProductNatureProvider>,
    pub aggregated_prices: Arc<dyn AggregatedPriceCollaborator>,
    pub simple_prices: Arc<dyn SimplePriceCollaborator>,
    pub locales: Arc<dyn LocaleConfigProvider>,
    pub localizer: Arc<dyn ContentLocalizer>,
    pub descriptors: Arc<dyn InterfaceDescriptorLookup>,
}

impl CatalogCollaborators {
    /// Serve every lookup from one backend implementing all of them.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: CategoryHierarchyProvider
            + CatalogMembershipProvider
            + FeatureSetProvider
            + InventoryProvider
            + ProductNatureProvider
            + AggregatedPriceCollaborator
            + SimplePriceCollaborator
            + LocaleConfigProvider
            + ContentLocalizer
            + InterfaceDescriptorLookup
            + 'static,
    {
        Self {
            hierarchy: backend.clone(),
            catalogs: backend.clone(),
            features: backend.clone(),
            inventory: backend.clone(),
            nature: backend.clone(),
            aggregated_prices: backend.clone(),
            simple_prices: backend.clone(),
            locales: backend.clone(),
            localizer: backend.clone(),
            descriptors: backend,
        }
    }
}
