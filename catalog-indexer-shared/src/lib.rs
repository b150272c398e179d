//! # Catalog Indexer Shared
//!
//! Data model shared by the catalog indexer crates: the product records read
//! from storage, the intermediate attribute set built during enrichment, and
//! the multi-valued search document handed to the write path.

pub mod attributes;
pub mod document;
pub mod locale;
pub mod price;
pub mod product;

pub use attributes::{AttributeContext, AttributeValue, LocalizedContentMap, DEFAULT_LOCALE_KEY};
pub use document::Document;
pub use locale::Locale;
pub use price::PriceResult;
pub use product::{ProductRecord, RequestContext};
