//! Product records and per-request caller state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Context key holding the current principal.
pub const PRINCIPAL_KEY: &str = "userLogin";

/// A normalized product record as read from storage.
///
/// The pipeline only ever reads from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// The product's unique identifier.
    pub product_id: String,
    /// Type tag, e.g. `FINISHED_GOOD` or `AGGREGATED`.
    #[serde(default)]
    pub product_type_id: Option<String>,
    /// Named scalar fields (`productName`, `description`, `smallImageUrl`, ...).
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl ProductRecord {
    /// Create a record with no type tag and no fields.
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            product_type_id: None,
            fields: BTreeMap::new(),
        }
    }

    /// Set the type tag.
    pub fn with_type(mut self, product_type_id: impl Into<String>) -> Self {
        self.product_type_id = Some(product_type_id.into());
        self
    }

    /// Set a named scalar field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a named scalar field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The type tag, if any.
    pub fn product_type(&self) -> Option<&str> {
        self.product_type_id.as_deref()
    }
}

/// Caller-supplied key/value state passed through to collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestContext(BTreeMap<String, Value>);

impl RequestContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The current principal, when one was supplied as a string.
    pub fn principal(&self) -> Option<&str> {
        self.get(PRINCIPAL_KEY).and_then(Value::as_str)
    }

    /// All entries, in key order.
    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let product = ProductRecord::new("P1")
            .with_type("AGGREGATED")
            .with_field("productName", "Desk");

        assert_eq!(product.product_type(), Some("AGGREGATED"));
        assert_eq!(product.field("productName"), Some("Desk"));
        assert!(product.field("description").is_none());
    }

    #[test]
    fn test_record_deserializes_without_optional_parts() {
        let product: ProductRecord = serde_json::from_str(r#"{"productId":"P2"}"#).unwrap();
        assert_eq!(product.product_id, "P2");
        assert!(product.product_type().is_none());
        assert!(product.fields.is_empty());
    }

    #[test]
    fn test_context_principal() {
        let ctx = RequestContext::new().with(PRINCIPAL_KEY, "admin");
        assert_eq!(ctx.principal(), Some("admin"));

        let ctx = RequestContext::new().with(PRINCIPAL_KEY, 42);
        assert!(ctx.principal().is_none());
    }
}
