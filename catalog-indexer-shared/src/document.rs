//! The multi-valued search document.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field name of the document identifier.
pub const ID_FIELD: &str = "productId";

/// A search document ready for the write path.
///
/// Every field may carry several values; [`Document::add_field`] appends
/// rather than overwrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Field name to its values, in insertion order per field.
    pub fields: BTreeMap<String, Vec<String>>,
    /// When the document was built.
    pub indexed_at: DateTime<Utc>,
}

impl Document {
    /// Create an empty document stamped with the current time.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            indexed_at: Utc::now(),
        }
    }

    /// Append a value to a field.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// All values of a field.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// First value of a field.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// The product identifier, when the document carries one.
    pub fn id(&self) -> Option<&str> {
        self.first(ID_FIELD)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names, sorted.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
