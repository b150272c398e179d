//! Per-product feature, inventory and classification lookups.

use rust_decimal::Decimal;

use crate::errors::RepositoryError;
use catalog_indexer_shared::ProductRecord;

/// Resolves the feature ids applied to a product.
pub trait FeatureSetProvider: Send + Sync {
    fn features(&self, product_id: &str) -> Result<Vec<String>, RepositoryError>;
}

/// Resolves stock levels.
pub trait InventoryProvider: Send + Sync {
    /// Total quantity available to promise across facilities.
    ///
    /// `Ok(None)` means the stock level is unknown, which is not the same as
    /// zero stock.
    fn available_to_promise(&self, product_id: &str) -> Result<Option<Decimal>, RepositoryError>;
}

/// Classifies products as virtual/variant and digital/physical.
///
/// Virtual and variant status depend on product associations and need a
/// lookup; digital and physical status follow from the record alone.
pub trait ProductNatureProvider: Send + Sync {
    /// Whether the product is a virtual parent of variants.
    fn is_virtual(&self, product_id: &str) -> Result<bool, RepositoryError>;

    /// Whether the product is a variant of a virtual product.
    fn is_variant(&self, product_id: &str) -> Result<bool, RepositoryError>;

    fn is_digital(&self, product: &ProductRecord) -> bool;

    fn is_physical(&self, product: &ProductRecord) -> bool;
}
