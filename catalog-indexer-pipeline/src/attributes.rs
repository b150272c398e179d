//! Attribute names of the product indexing interface.
//!
//! These are the keys of the [`AttributeContext`](catalog_indexer_shared::AttributeContext)
//! handed from enrichment to assembly.

pub const PRODUCT_ID: &str = "productId";
pub const INTERNAL_NAME: &str = "internalName";
pub const PRODUCT_TYPE_ID: &str = "productTypeId";
pub const SMALL_IMAGE: &str = "smallImage";
pub const MEDIUM_IMAGE: &str = "mediumImage";
pub const LARGE_IMAGE: &str = "largeImage";

pub const CATEGORY: &str = "category";
pub const CATALOG: &str = "catalog";
pub const FEATURES: &str = "features";
pub const ATTRIBUTES: &str = "attributes";

pub const IN_STOCK: &str = "inStock";
pub const IS_VIRTUAL: &str = "isVirtual";
pub const IS_VARIANT: &str = "isVariant";
pub const IS_DIGITAL: &str = "isDigital";
pub const IS_PHYSICAL: &str = "isPhysical";

pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const LONG_DESCRIPTION: &str = "longDescription";

pub const LIST_PRICE: &str = "listPrice";
pub const DEFAULT_PRICE: &str = "defaultPrice";

/// Product record field to attribute name, for plain copied fields.
pub const COPIED_FIELDS: &[(&str, &str)] = &[
    ("internalName", INTERNAL_NAME),
    ("smallImageUrl", SMALL_IMAGE),
    ("mediumImageUrl", MEDIUM_IMAGE),
    ("largeImageUrl", LARGE_IMAGE),
];

/// Attribute holding the localized map of a content kind.
pub fn content_attribute(kind: catalog_indexer_repository::ContentKind) -> &'static str {
    use catalog_indexer_repository::ContentKind;

    match kind {
        ContentKind::ProductName => TITLE,
        ContentKind::Description => DESCRIPTION,
        ContentKind::LongDescription => LONG_DESCRIPTION,
    }
}
