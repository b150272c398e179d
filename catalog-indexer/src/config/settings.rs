//! Environment-driven indexer settings.

use std::env;
use std::path::PathBuf;

use crate::IndexingError;
use catalog_indexer_repository::PRODUCT_ATTRIBUTES_INTERFACE;

/// Default number of documents per sink write.
const DEFAULT_BATCH_SIZE: usize = 100;

/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Catalog snapshot to index.
    pub snapshot_path: PathBuf,
    /// Output file for JSON-lines documents; stdout when `None`.
    pub output_path: Option<PathBuf>,
    /// Documents per sink write.
    pub batch_size: usize,
    /// Currency prices are resolved in.
    pub currency: Option<String>,
    /// Store whose locale settings apply.
    pub store_id: Option<String>,
    /// Interface declaring the permitted simple document fields.
    pub schema_interface: String,
    /// Principal passed to pricing services.
    pub user_login: Option<String>,
}

impl IndexerConfig {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CATALOG_SNAPSHOT_PATH`: catalog snapshot JSON file (required)
    /// - `INDEXER_OUTPUT_PATH`: output file (default: stdout)
    /// - `INDEXER_BATCH_SIZE`: documents per write (default: 100)
    /// - `INDEXER_CURRENCY`: pricing currency (default: pricing service default)
    /// - `INDEXER_STORE_ID`: store for locale settings (default: none)
    /// - `INDEXER_SCHEMA_INTERFACE`: field interface (default: solrProductAttributesSimple)
    /// - `INDEXER_USER_LOGIN`: pricing principal (default: none)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let snapshot_path = non_empty("CATALOG_SNAPSHOT_PATH")
            .map(PathBuf::from)
            .ok_or_else(|| IndexingError::config("CATALOG_SNAPSHOT_PATH must be set"))?;

        let batch_size = match non_empty("INDEXER_BATCH_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(IndexingError::config(format!(
                        "INDEXER_BATCH_SIZE must be a positive integer, got {raw:?}"
                    )))
                }
            },
            None => DEFAULT_BATCH_SIZE,
        };

        Ok(Self {
            snapshot_path,
            output_path: non_empty("INDEXER_OUTPUT_PATH").map(PathBuf::from),
            batch_size,
            currency: non_empty("INDEXER_CURRENCY"),
            store_id: non_empty("INDEXER_STORE_ID"),
            schema_interface: non_empty("INDEXER_SCHEMA_INTERFACE")
                .unwrap_or_else(|| PRODUCT_ATTRIBUTES_INTERFACE.to_string()),
            user_login: non_empty("INDEXER_USER_LOGIN"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            IndexerConfig::from_lookup(lookup(&[("CATALOG_SNAPSHOT_PATH", "catalog.json")])).unwrap();

        assert_eq!(config.snapshot_path, PathBuf::from("catalog.json"));
        assert_eq!(config.output_path, None);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.currency, None);
        assert_eq!(config.schema_interface, "solrProductAttributesSimple");
        assert_eq!(config.user_login, None);
    }

    #[test]
    fn test_overrides() {
        let config = IndexerConfig::from_lookup(lookup(&[
            ("CATALOG_SNAPSHOT_PATH", "catalog.json"),
            ("INDEXER_OUTPUT_PATH", "out.jsonl"),
            ("INDEXER_BATCH_SIZE", "25"),
            ("INDEXER_CURRENCY", "EUR"),
            ("INDEXER_STORE_ID", "WebStore"),
            ("INDEXER_USER_LOGIN", "system"),
        ]))
        .unwrap();

        assert_eq!(config.output_path, Some(PathBuf::from("out.jsonl")));
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.currency.as_deref(), Some("EUR"));
        assert_eq!(config.store_id.as_deref(), Some("WebStore"));
        assert_eq!(config.user_login.as_deref(), Some("system"));
    }

    #[test]
    fn test_missing_snapshot_path() {
        let err = IndexerConfig::from_lookup(lookup(&[("CATALOG_SNAPSHOT_PATH", "  ")])).unwrap_err();
        assert!(matches!(err, IndexingError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_batch_size() {
        for raw in ["0", "-3", "many"] {
            let err = IndexerConfig::from_lookup(lookup(&[
                ("CATALOG_SNAPSHOT_PATH", "catalog.json"),
                ("INDEXER_BATCH_SIZE", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, IndexingError::ConfigError(_)));
        }
    }
}
