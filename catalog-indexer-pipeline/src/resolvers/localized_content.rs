//! Per-locale product text.

use std::sync::Arc;

use tracing::warn;

use catalog_indexer_repository::{ContentKind, ContentLocalizer, RepositoryError};
use catalog_indexer_shared::{Locale, LocalizedContentMap, ProductRecord};

/// Builds the locale-to-text map of one content kind.
pub struct LocalizedContentResolver {
    localizer: Arc<dyn ContentLocalizer>,
}

impl LocalizedContentResolver {
    pub fn new(localizer: Arc<dyn ContentLocalizer>) -> Self {
        Self { localizer }
    }

    /// Map of `kind` for every active locale plus the `default` entry.
    ///
    /// A locale without an override gets `default_value`, so an absent
    /// translation cannot be told apart from one equal to the default.
    pub fn resolve_localized_map(
        &self,
        product: &ProductRecord,
        kind: ContentKind,
        default_value: Option<&str>,
        active_locales: &[Locale],
    ) -> Result<LocalizedContentMap, RepositoryError> {
        let mut map = LocalizedContentMap::new(default_value.map(String::from));

        for locale in active_locales {
            let value = self
                .localizer
                .text(product, kind, locale)?
                .or_else(|| default_value.map(String::from));
            if !map.insert(locale, value) {
                warn!(
                    product_id = %product.product_id,
                    locale = %locale,
                    "Active locale collides with the default entry key; skipped"
                );
            }
        }

        Ok(map)
    }
}
