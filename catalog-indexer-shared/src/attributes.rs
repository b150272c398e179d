//! The intermediate attribute set built during product enrichment.
//!
//! Attribute names are those of the indexing interface (`productId`,
//! `category`, `title`, ...), which are not always the names of the final
//! document fields. The assembler maps between the two.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Sentinel key of the non-localized entry of a [`LocalizedContentMap`].
pub const DEFAULT_LOCALE_KEY: &str = "default";

/// Locale tag to text for one content kind.
///
/// Always holds a [`DEFAULT_LOCALE_KEY`] entry carrying the record's
/// non-localized value, which may itself be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedContentMap(BTreeMap<String, Option<String>>);

impl LocalizedContentMap {
    /// Create a map holding only the default entry.
    pub fn new(default_value: Option<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(DEFAULT_LOCALE_KEY.to_string(), default_value);
        Self(entries)
    }

    /// Set the text for a locale.
    ///
    /// A locale tagged like the default key is ignored so it cannot replace
    /// the non-localized entry. Returns whether the entry was stored.
    pub fn insert(&mut self, locale: &Locale, value: Option<String>) -> bool {
        if locale.as_str() == DEFAULT_LOCALE_KEY {
            return false;
        }
        self.0.insert(locale.as_str().to_string(), value);
        true
    }

    /// The non-localized value.
    pub fn default_value(&self) -> Option<&str> {
        self.0.get(DEFAULT_LOCALE_KEY).and_then(|v| v.as_deref())
    }

    /// Text stored under a key, which is a locale tag or the default key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    /// Whether an entry exists for the key, regardless of its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Entries other than the default one.
    pub fn localized(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .filter(|(k, _)| k.as_str() != DEFAULT_LOCALE_KEY)
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Number of entries, default included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; the default entry is always present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Value of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Scalar(String),
    Flag(bool),
    List(Vec<String>),
    Localized(LocalizedContentMap),
}

impl AttributeValue {
    /// String form of a scalar or flag; `None` for collections.
    pub fn as_text(&self) -> Option<String> {
        match self {
            AttributeValue::Scalar(s) => Some(s.clone()),
            AttributeValue::Flag(b) => Some(b.to_string()),
            AttributeValue::List(_) | AttributeValue::Localized(_) => None,
        }
    }
}

/// Attribute name to value, rebuilt for every product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeContext(BTreeMap<String, AttributeValue>);

impl AttributeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar attribute.
    pub fn set_scalar(&mut self, name: &str, value: impl Into<String>) {
        self.0
            .insert(name.to_string(), AttributeValue::Scalar(value.into()));
    }

    /// Set a scalar attribute when a value is present.
    pub fn set_scalar_opt(&mut self, name: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set_scalar(name, value);
        }
    }

    /// Set a flag attribute only when it is true.
    pub fn set_flag_if(&mut self, name: &str, flag: bool) {
        if flag {
            self.0.insert(name.to_string(), AttributeValue::Flag(true));
        }
    }

    /// Set a collection attribute.
    pub fn set_list(&mut self, name: &str, values: Vec<String>) {
        self.0.insert(name.to_string(), AttributeValue::List(values));
    }

    /// Set a localized attribute.
    pub fn set_localized(&mut self, name: &str, map: LocalizedContentMap) {
        self.0
            .insert(name.to_string(), AttributeValue::Localized(map));
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Scalar or flag attribute as text.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).and_then(AttributeValue::as_text)
    }

    /// Collection attribute.
    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.get(name) {
            Some(AttributeValue::List(values)) => Some(values),
            _ => None,
        }
    }

    /// Localized attribute.
    pub fn localized(&self, name: &str) -> Option<&LocalizedContentMap> {
        match self.get(name) {
            Some(AttributeValue::Localized(map)) => Some(map),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_map_always_has_default() {
        let map = LocalizedContentMap::new(None);
        assert!(map.contains_key(DEFAULT_LOCALE_KEY));
        assert!(map.default_value().is_none());
        assert_eq!(map.len(), 1);
        assert_eq!(map.localized().count(), 0);
    }

    #[test]
    fn test_localized_entries_exclude_default() {
        let mut map = LocalizedContentMap::new(Some("Chair".to_string()));
        map.insert(&Locale::new("fr_FR"), Some("Chaise".to_string()));
        map.insert(&Locale::new("de_DE"), None);

        let entries: Vec<_> = map.localized().collect();
        assert_eq!(entries, vec![("de_DE", None), ("fr_FR", Some("Chaise"))]);
        assert_eq!(map.get("fr_FR"), Some("Chaise"));
        assert_eq!(map.default_value(), Some("Chair"));
    }

    #[test]
    fn test_locale_named_default_cannot_replace_default_entry() {
        let mut map = LocalizedContentMap::new(Some("Chair".to_string()));

        assert!(!map.insert(&Locale::new(DEFAULT_LOCALE_KEY), Some("Stuhl".to_string())));
        assert!(map.insert(&Locale::new("de_DE"), Some("Stuhl".to_string())));

        assert_eq!(map.default_value(), Some("Chair"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.localized().collect::<Vec<_>>(), vec![("de_DE", Some("Stuhl"))]);
    }

    #[test]
    fn test_flags_only_set_when_true() {
        let mut ctx = AttributeContext::new();
        ctx.set_flag_if("isVirtual", false);
        ctx.set_flag_if("isVariant", true);

        assert!(!ctx.contains("isVirtual"));
        assert_eq!(ctx.text("isVariant"), Some("true".to_string()));
    }

    #[test]
    fn test_typed_accessors() {
        let mut ctx = AttributeContext::new();
        ctx.set_scalar("productId", "P1");
        ctx.set_scalar_opt("internalName", None::<String>);
        ctx.set_list("catalog", vec!["C1".to_string()]);

        assert_eq!(ctx.text("productId"), Some("P1".to_string()));
        assert!(!ctx.contains("internalName"));
        assert_eq!(ctx.list("catalog"), Some(&["C1".to_string()][..]));
        assert!(ctx.text("catalog").is_none());
        assert!(ctx.localized("catalog").is_none());
    }
}
