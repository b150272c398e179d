//! Enrichment resolvers.
//!
//! Each resolver turns collaborator lookups for one product into a single
//! attribute value of the product's attribute context.

mod category_trail;
mod localized_content;
mod price;

use std::collections::HashSet;

pub use category_trail::{depth_prefixed_paths, root_category, CategoryTrailResolver};
pub use localized_content::LocalizedContentResolver;
pub use price::{round_price, PriceResolver, PricingStrategy, AGGREGATED_PRODUCT_TYPE};

/// Insertion-ordered list that ignores repeated values.
#[derive(Debug, Default)]
pub(crate) struct UniqueList {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl UniqueList {
    /// Append `value` unless already present. Returns whether it was added.
    pub(crate) fn push(&mut self, value: String) -> bool {
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.items
    }
}
