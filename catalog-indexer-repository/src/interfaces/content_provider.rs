//! Locale configuration and localized product text.

use crate::errors::RepositoryError;
use crate::types::ContentKind;
use catalog_indexer_shared::{Locale, ProductRecord};

/// Supplies the locales content is indexed in.
///
/// Both lookups accept an optional store id so that locale sets can be
/// configured per store; callers currently pass `None`.
pub trait LocaleConfigProvider: Send + Sync {
    /// Locales to produce localized fields for, in configured order.
    fn active_locales(&self, store_id: Option<&str>) -> Result<Vec<Locale>, RepositoryError>;

    /// Locale used when configuring aggregated product prices.
    fn default_price_locale(&self, store_id: Option<&str>) -> Result<Locale, RepositoryError>;
}

/// Resolves localized overrides of product text.
pub trait ContentLocalizer: Send + Sync {
    /// The localized text of `kind` for `locale`, or `None` when there is no
    /// override for that locale.
    fn text(
        &self,
        product: &ProductRecord,
        kind: ContentKind,
        locale: &Locale,
    ) -> Result<Option<String>, RepositoryError>;
}
