//! Bidirectional field name translation.
//!
//! The three localizable text fields never go through the static table:
//! their document names carry a locale suffix (`title_i18n_fr_FR`) and are
//! built from a fixed prefix instead.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use catalog_indexer_repository::ContentKind;
use catalog_indexer_shared::Locale;

const TITLE_PREFIX: &str = "title_i18n_";
const DESCRIPTION_PREFIX: &str = "description_i18n_";
const LONG_DESCRIPTION_PREFIX: &str = "longdescription_i18n_";

const INTERNAL_NAME_FIELD: &str = "internalName";
const NAME_SORT_FIELD: &str = "alphaNameSort";
const TITLE_SORT_PREFIX: &str = "alphaTitleSort_";

pub const LIST_PRICE_TYPE: &str = "LIST_PRICE";
pub const DEFAULT_PRICE_TYPE: &str = "DEFAULT_PRICE";
pub const LIST_PRICE_FIELD: &str = "listPrice";
pub const DEFAULT_PRICE_FIELD: &str = "defaultPrice";

/// Document field prefix of a localizable content kind.
pub fn localized_prefix(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::ProductName => TITLE_PREFIX,
        ContentKind::Description => DESCRIPTION_PREFIX,
        ContentKind::LongDescription => LONG_DESCRIPTION_PREFIX,
    }
}

fn kind_of_storage_field(storage_field: &str) -> Option<ContentKind> {
    ContentKind::ALL
        .into_iter()
        .find(|k| k.storage_field() == storage_field)
}

/// Immutable storage-field to document-field table, indexed both ways.
///
/// Values are expected to be unique; on a duplicate, the reverse index keeps
/// the last pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNameTable {
    pairs: Vec<(String, String)>,
    to_document: HashMap<String, String>,
    to_storage: HashMap<String, String>,
}

impl FieldNameTable {
    /// Build a table from `(storage_field, document_field)` pairs.
    pub fn new<S, D>(pairs: impl IntoIterator<Item = (S, D)>) -> Self
    where
        S: Into<String>,
        D: Into<String>,
    {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(s, d)| (s.into(), d.into()))
            .collect();

        let to_document = pairs.iter().cloned().collect();
        let to_storage = pairs.iter().map(|(s, d)| (d.clone(), s.clone())).collect();

        Self {
            pairs,
            to_document,
            to_storage,
        }
    }

    /// The product field table.
    pub fn products() -> Self {
        Self::new([
            ("productId", "productId"),
            ("internalName", "internalName"),
            ("smallImageUrl", "smallImageUrl"),
            ("mediumImage", "mediumImage"),
            ("largeImage", "largeImage"),
            ("inStock", "inStock"),
            ("isVirtual", "isVirtual"),
            ("isVariant", "isVariant"),
        ])
    }

    /// `(storage_field, document_field)` pairs in construction order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }
}

impl Default for FieldNameTable {
    fn default() -> Self {
        Self::products()
    }
}

/// Translates field names between product records and search documents.
#[derive(Debug, Clone)]
pub struct FieldNameTranslator {
    table: Arc<FieldNameTable>,
}

impl FieldNameTranslator {
    pub fn new(table: Arc<FieldNameTable>) -> Self {
        Self { table }
    }

    /// Document field for a storage field.
    ///
    /// Localizable text fields map to their `<prefix><locale>` name; other
    /// fields go through the table and yield `None` when not listed.
    pub fn to_document_field(&self, storage_field: &str, locale: &Locale) -> Option<String> {
        if let Some(kind) = kind_of_storage_field(storage_field) {
            return Some(self.localized_field(kind, locale.as_str()));
        }
        self.table.to_document.get(storage_field).cloned()
    }

    /// Storage field for a document field.
    ///
    /// Any name starting with a localized prefix maps back to its text field
    /// whatever the locale suffix.
    pub fn to_storage_field(&self, document_field: &str) -> Option<String> {
        ContentKind::ALL
            .into_iter()
            .find(|k| document_field.starts_with(localized_prefix(*k)))
            .map(|k| k.storage_field().to_string())
            .or_else(|| self.table.to_storage.get(document_field).cloned())
    }

    /// Field to sort on when sorting by `document_field`.
    pub fn to_sort_field(&self, document_field: &str) -> String {
        if document_field == INTERNAL_NAME_FIELD {
            NAME_SORT_FIELD.to_string()
        } else if let Some(locale) = document_field.strip_prefix(TITLE_PREFIX) {
            format!("{}{}", TITLE_SORT_PREFIX, locale)
        } else {
            document_field.to_string()
        }
    }

    /// Document price field for a price type tag.
    ///
    /// Only list and default prices are indexed; any other tag falls back to
    /// the default price with a warning.
    pub fn to_price_field(&self, price_type: &str) -> &'static str {
        if price_type == LIST_PRICE_TYPE {
            return LIST_PRICE_FIELD;
        }
        if price_type != DEFAULT_PRICE_TYPE {
            warn!(
                price_type,
                "Price type is not indexed; using {} ({}) instead", DEFAULT_PRICE_FIELD, DEFAULT_PRICE_TYPE
            );
        }
        DEFAULT_PRICE_FIELD
    }

    /// `<prefix><locale>` document field of a content kind.
    pub fn localized_field(&self, kind: ContentKind, locale: &str) -> String {
        format!("{}{}", localized_prefix(kind), locale)
    }
}

impl Default for FieldNameTranslator {
    fn default() -> Self {
        Self::new(Arc::new(FieldNameTable::products()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> FieldNameTranslator {
        FieldNameTranslator::default()
    }

    #[test]
    fn test_table_round_trip() {
        let translator = translator();
        let locale = Locale::new("en_US");
        let table = FieldNameTable::products();

        for (storage, _) in table.entries() {
            let document = translator.to_document_field(storage, &locale).unwrap();
            assert_eq!(translator.to_storage_field(&document).as_deref(), Some(storage));
        }
    }

    #[test]
    fn test_localized_fields() {
        let translator = translator();
        let locale = Locale::new("fr_FR");

        assert_eq!(
            translator.to_document_field("productName", &locale).as_deref(),
            Some("title_i18n_fr_FR")
        );
        assert_eq!(
            translator.to_document_field("description", &locale).as_deref(),
            Some("description_i18n_fr_FR")
        );
        assert_eq!(
            translator.to_document_field("longDescription", &locale).as_deref(),
            Some("longdescription_i18n_fr_FR")
        );

        assert_eq!(translator.to_storage_field("title_i18n_de").as_deref(), Some("productName"));
        assert_eq!(
            translator.to_storage_field("description_i18n_en_US").as_deref(),
            Some("description")
        );
        assert_eq!(
            translator.to_storage_field("longdescription_i18n_en_US").as_deref(),
            Some("longDescription")
        );
    }

    #[test]
    fn test_unknown_fields() {
        let translator = translator();
        assert!(translator.to_document_field("weight", &Locale::new("en_US")).is_none());
        assert!(translator.to_storage_field("cat").is_none());
    }

    #[test]
    fn test_sort_fields() {
        let translator = translator();
        assert_eq!(translator.to_sort_field("internalName"), "alphaNameSort");
        assert_eq!(translator.to_sort_field("title_i18n_en_US"), "alphaTitleSort_en_US");
        assert_eq!(translator.to_sort_field("smallImageUrl"), "smallImageUrl");
    }

    #[test]
    fn test_price_fields() {
        let translator = translator();
        assert_eq!(translator.to_price_field("LIST_PRICE"), "listPrice");
        assert_eq!(translator.to_price_field("DEFAULT_PRICE"), "defaultPrice");
        assert_eq!(translator.to_price_field("PROMO_PRICE"), "defaultPrice");
    }

    #[test]
    fn test_reverse_index_keeps_last_duplicate() {
        let table = FieldNameTable::new([("a", "x"), ("b", "x")]);
        let translator = FieldNameTranslator::new(Arc::new(table));
        assert_eq!(translator.to_storage_field("x").as_deref(), Some("b"));
    }
}
