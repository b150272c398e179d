//! Document assembly.
//!
//! Turns a product's attribute context into the flat, multi-valued search
//! document. Only three kinds of attributes reach the document: simple
//! fields the schema permits, the known multi-valued attributes, and the
//! localized text maps.

use std::sync::Arc;

use tracing::debug;

use crate::attributes;
use crate::naming::FieldNameTranslator;
use crate::schema::SchemaFieldRegistry;
use catalog_indexer_repository::ContentKind;
use catalog_indexer_shared::{AttributeContext, Document, LocalizedContentMap};

/// Multi-valued attribute to document field.
const MULTI_VALUED_FIELDS: &[(&str, &str)] = &[
    (attributes::CATALOG, "catalog"),
    (attributes::CATEGORY, "cat"),
    (attributes::FEATURES, "features"),
    (attributes::ATTRIBUTES, "attributes"),
];

/// How one localized attribute is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedFieldLayout {
    pub kind: ContentKind,
    /// Field receiving the non-localized value. When `None` the default
    /// entry is not written.
    pub default_field: Option<String>,
}

impl LocalizedFieldLayout {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            default_field: None,
        }
    }

    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = Some(field.into());
        self
    }
}

/// Builds documents from attribute contexts.
pub struct DocumentAssembler {
    registry: Arc<SchemaFieldRegistry>,
    translator: FieldNameTranslator,
    localized_fields: Vec<LocalizedFieldLayout>,
}

impl DocumentAssembler {
    pub fn new(registry: Arc<SchemaFieldRegistry>, translator: FieldNameTranslator) -> Self {
        Self {
            registry,
            translator,
            localized_fields: ContentKind::ALL.into_iter().map(LocalizedFieldLayout::new).collect(),
        }
    }

    /// Replace the localized field layout.
    pub fn with_localized_fields(mut self, localized_fields: Vec<LocalizedFieldLayout>) -> Self {
        self.localized_fields = localized_fields;
        self
    }

    pub fn assemble(&self, attrs: &AttributeContext) -> Document {
        let mut doc = Document::new();

        for field in self.registry.permitted_fields().iter() {
            if let Some(value) = attrs.text(field) {
                doc.add_field(field.as_str(), value);
            }
        }

        for (attribute, field) in MULTI_VALUED_FIELDS {
            for value in attrs.list(attribute).unwrap_or_default() {
                doc.add_field(*field, value.as_str());
            }
        }

        for layout in &self.localized_fields {
            if let Some(map) = attrs.localized(attributes::content_attribute(layout.kind)) {
                self.add_localized(&mut doc, layout, map);
            }
        }

        debug!(id = ?doc.id(), field_count = doc.len(), "Assembled document");
        doc
    }

    fn add_localized(&self, doc: &mut Document, layout: &LocalizedFieldLayout, map: &LocalizedContentMap) {
        if let (Some(field), Some(value)) = (&layout.default_field, map.default_value()) {
            doc.add_field(field.as_str(), value);
        }
        for (locale, value) in map.localized() {
            if let Some(value) = value {
                doc.add_field(self.translator.localized_field(layout.kind, locale), value);
            }
        }
    }
}
