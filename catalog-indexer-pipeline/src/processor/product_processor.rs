//! Product processor implementation.
//!
//! Builds the attribute context of a product from its collaborators and
//! assembles it into a search document.

use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use crate::assembler::DocumentAssembler;
use crate::attributes;
use crate::naming::{FieldNameTable, FieldNameTranslator};
use crate::processor::CatalogCollaborators;
use crate::resolvers::{CategoryTrailResolver, LocalizedContentResolver, PriceResolver};
use crate::schema::SchemaFieldRegistry;
use catalog_indexer_repository::PRODUCT_ATTRIBUTES_INTERFACE;
use catalog_indexer_repository::{
    ContentKind, FeatureSetProvider, InventoryProvider, LocaleConfigProvider,
    ProductNatureProvider, RepositoryError,
};
use catalog_indexer_shared::{AttributeContext, Document, ProductRecord, RequestContext};

/// Configuration for the product processor.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Currency prices are resolved in; `None` uses the pricing default.
    pub currency: Option<String>,
    /// Store whose locale settings apply; `None` for global settings.
    pub store_id: Option<String>,
    /// Interface declaring the permitted simple document fields.
    pub schema_interface: String,
    /// Storage to document field name table.
    pub field_names: Arc<FieldNameTable>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            currency: None,
            store_id: None,
            schema_interface: PRODUCT_ATTRIBUTES_INTERFACE.to_string(),
            field_names: Arc::new(FieldNameTable::products()),
        }
    }
}

/// Processor that transforms product records into search documents.
///
/// The processor holds no per-product state and may be shared between
/// workers; each call builds and returns its own context and document.
pub struct ProductProcessor {
    trails: CategoryTrailResolver,
    prices: PriceResolver,
    content: LocalizedContentResolver,
    features: Arc<dyn FeatureSetProvider>,
    inventory: Arc<dyn InventoryProvider>,
    nature: Arc<dyn ProductNatureProvider>,
    locales: Arc<dyn LocaleConfigProvider>,
    assembler: DocumentAssembler,
    store_id: Option<String>,
}

impl ProductProcessor {
    /// Create a new product processor with default configuration.
    pub fn new(collaborators: CatalogCollaborators) -> Self {
        Self::with_config(collaborators, ProcessorConfig::default())
    }

    /// Create a new product processor with custom configuration.
    pub fn with_config(collaborators: CatalogCollaborators, config: ProcessorConfig) -> Self {
        let registry = Arc::new(SchemaFieldRegistry::new(
            collaborators.descriptors.clone(),
            config.schema_interface,
        ));
        let translator = FieldNameTranslator::new(config.field_names);

        Self {
            trails: CategoryTrailResolver::new(collaborators.hierarchy, collaborators.catalogs),
            prices: PriceResolver::new(
                collaborators.aggregated_prices,
                collaborators.simple_prices,
                collaborators.locales.clone(),
            )
            .with_currency(config.currency)
            .with_store(config.store_id.clone()),
            content: LocalizedContentResolver::new(collaborators.localizer),
            features: collaborators.features,
            inventory: collaborators.inventory,
            nature: collaborators.nature,
            locales: collaborators.locales,
            assembler: DocumentAssembler::new(registry, translator),
            store_id: config.store_id,
        }
    }

    /// Build the attribute context of a product.
    ///
    /// A failing lookup stops enrichment; the error is logged and whatever
    /// was built up to that point is returned.
    pub fn product_attributes(&self, product: &ProductRecord, context: &RequestContext) -> AttributeContext {
        let mut attrs = AttributeContext::new();

        if let Err(e) = self.enrich(product, context, &mut attrs) {
            error!(
                product_id = %product.product_id,
                error = %e,
                attribute_count = attrs.len(),
                "Failed to build product attributes; keeping partial attributes"
            );
        }

        attrs
    }

    /// Transform a product into its search document.
    pub fn process(&self, product: &ProductRecord, context: &RequestContext) -> Document {
        let attrs = self.product_attributes(product, context);
        self.assembler.assemble(&attrs)
    }

    /// Transform a batch of products, one document per product.
    #[instrument(skip(self, products, context), fields(product_count = products.len()))]
    pub fn process_batch(&self, products: &[ProductRecord], context: &RequestContext) -> Vec<Document> {
        let documents: Vec<Document> = products
            .iter()
            .map(|product| self.process(product, context))
            .collect();

        debug!(document_count = documents.len(), "Processed product batch");
        documents
    }

    fn enrich(
        &self,
        product: &ProductRecord,
        context: &RequestContext,
        attrs: &mut AttributeContext,
    ) -> Result<(), RepositoryError> {
        let product_id = product.product_id.as_str();
        debug!(product_id, "Building product attributes");

        attrs.set_scalar(attributes::PRODUCT_ID, product_id);
        for (field, attribute) in attributes::COPIED_FIELDS {
            attrs.set_scalar_opt(attribute, product.field(field));
        }
        attrs.set_scalar_opt(attributes::PRODUCT_TYPE_ID, product.product_type());

        let trails = self.trails.resolve_trails(product_id)?;
        let catalogs = self.trails.resolve_catalogs(&trails)?;
        attrs.set_list(attributes::CATEGORY, trails);
        attrs.set_list(attributes::CATALOG, catalogs);

        match self.features.features(product_id) {
            Ok(features) => attrs.set_list(attributes::FEATURES, features),
            Err(e) => warn!(product_id, error = %e, "Failed to resolve feature set; omitting features"),
        }

        // Unknown stock stays absent rather than reading as zero.
        let in_stock = self
            .inventory
            .available_to_promise(product_id)?
            .map(|atp| atp.trunc().normalize().to_string());
        attrs.set_scalar_opt(attributes::IN_STOCK, in_stock);

        attrs.set_flag_if(attributes::IS_VIRTUAL, self.nature.is_virtual(product_id)?);
        attrs.set_flag_if(attributes::IS_VARIANT, self.nature.is_variant(product_id)?);
        attrs.set_flag_if(attributes::IS_DIGITAL, self.nature.is_digital(product));
        attrs.set_flag_if(attributes::IS_PHYSICAL, self.nature.is_physical(product));

        let locales = self.locales.active_locales(self.store_id.as_deref())?;
        for kind in ContentKind::ALL {
            let map = self.content.resolve_localized_map(
                product,
                kind,
                product.field(kind.storage_field()),
                &locales,
            )?;
            attrs.set_localized(attributes::content_attribute(kind), map);
        }

        let prices = self.prices.resolve_price(product, context)?;
        attrs.set_scalar_opt(attributes::LIST_PRICE, prices.list_price_text());
        attrs.set_scalar_opt(attributes::DEFAULT_PRICE, prices.default_price_text());

        Ok(())
    }
}
