//! JSON-backed catalog snapshot.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::RepositoryError;
use crate::interfaces::{
    AggregatedPriceCollaborator, AggregatedPriceConfig, CatalogMembershipProvider,
    CategoryHierarchyProvider, ContentLocalizer, FeatureSetProvider, InterfaceDescriptorLookup,
    InventoryProvider, LocaleConfigProvider, ProductNatureProvider, SimplePriceCollaborator,
};
use crate::types::{
    AggregatedPriceRequest, ContentKind, ParameterDescriptor, ServiceDescriptor,
    SimplePriceRequest, SimplePriceResult, PRODUCT_ATTRIBUTES_INTERFACE,
};
use catalog_indexer_shared::{Locale, ProductRecord};

const DIGITAL_TYPES: &[&str] = &["DIGITAL_GOOD", "FINDIG_GOOD"];
const NON_PHYSICAL_TYPES: &[&str] = &["DIGITAL_GOOD", "SERVICE"];
const DEFAULT_LOCALE: &str = "en_US";

/// Locale configuration of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSettings {
    pub active: Vec<Locale>,
    pub default_price_locale: Locale,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            active: vec![Locale::new(DEFAULT_LOCALE)],
            default_price_locale: Locale::new(DEFAULT_LOCALE),
        }
    }
}

/// One configurable option of an aggregated product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedOption {
    pub option_id: String,
    #[serde(default)]
    pub list_price: Option<Decimal>,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Selected by [`AggregatedPriceConfig::set_defaults`].
    #[serde(default)]
    pub is_default: bool,
}

/// Base prices and options of an aggregated product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPriceSheet {
    #[serde(default)]
    pub base: SimplePriceResult,
    #[serde(default)]
    pub options: Vec<PricedOption>,
}

/// A complete, read-only picture of a catalog.
///
/// Every map is keyed by the id named in its doc comment. Missing entries
/// read as "nothing recorded" rather than as errors, except for interface
/// descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    /// Product id to the categories it is a direct member of.
    #[serde(default)]
    pub category_members: BTreeMap<String, Vec<String>>,
    /// Category id to its parent categories.
    #[serde(default)]
    pub category_parents: BTreeMap<String, Vec<String>>,
    /// Category id to the catalogs it is attached to.
    #[serde(default)]
    pub catalog_categories: BTreeMap<String, Vec<String>>,
    /// Product id to feature ids.
    #[serde(default)]
    pub features: BTreeMap<String, Vec<String>>,
    /// Product id to quantity available to promise.
    #[serde(default)]
    pub inventory: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub virtual_products: BTreeSet<String>,
    #[serde(default)]
    pub variant_products: BTreeSet<String>,
    /// Product id to unrounded simple prices.
    #[serde(default)]
    pub prices: BTreeMap<String, SimplePriceResult>,
    /// Product id to aggregated price sheet.
    #[serde(default)]
    pub aggregated_prices: BTreeMap<String, AggregatedPriceSheet>,
    #[serde(default)]
    pub locales: LocaleSettings,
    /// Product id to locale tag to content kind to text.
    #[serde(default)]
    pub localized_content: BTreeMap<String, BTreeMap<String, BTreeMap<ContentKind, String>>>,
    /// Interface name to descriptor.
    #[serde(default = "default_interfaces")]
    pub interfaces: BTreeMap<String, ServiceDescriptor>,
}

fn default_interfaces() -> BTreeMap<String, ServiceDescriptor> {
    let mut parameters: Vec<ParameterDescriptor> = [
        "productId",
        "internalName",
        "productTypeId",
        "smallImage",
        "mediumImage",
        "largeImage",
        "inStock",
        "isVirtual",
        "isVariant",
        "isDigital",
        "isPhysical",
        "listPrice",
        "defaultPrice",
    ]
    .into_iter()
    .map(ParameterDescriptor::input)
    .collect();
    parameters.extend(
        ["userLogin", "locale", "timeZone"]
            .into_iter()
            .map(ParameterDescriptor::internal),
    );

    let mut interfaces = BTreeMap::new();
    interfaces.insert(
        PRODUCT_ATTRIBUTES_INTERFACE.to_string(),
        ServiceDescriptor {
            name: PRODUCT_ATTRIBUTES_INTERFACE.to_string(),
            parameters,
        },
    );
    interfaces
}

impl CatalogSnapshot {
    /// An empty snapshot carrying the standard interface descriptors.
    pub fn new() -> Self {
        Self {
            interfaces: default_interfaces(),
            ..Self::default()
        }
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, RepositoryError> {
        serde_json::from_str(json)
            .map_err(|e| RepositoryError::storage(format!("Invalid catalog snapshot: {}", e)))
    }

    /// Read and parse a snapshot file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            RepositoryError::storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let snapshot = Self::from_json_str(&json)?;

        info!(
            path = %path.display(),
            products = snapshot.products.len(),
            categories = snapshot.category_parents.len(),
            "Loaded catalog snapshot"
        );

        Ok(snapshot)
    }

    /// Look up a product record.
    pub fn product(&self, product_id: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    /// Walk parent links upward from `category_id`, producing every
    /// root-to-leaf trail. A parent already on the current path is skipped.
    fn collect_trails(&self, category_id: &str, on_path: &mut HashSet<String>) -> Vec<Vec<String>> {
        on_path.insert(category_id.to_string());

        let mut trails = Vec::new();
        for parent in self.category_parents.get(category_id).into_iter().flatten() {
            if on_path.contains(parent) {
                debug!(category_id, parent = %parent, "Skipping cyclic category parent");
                continue;
            }
            for mut trail in self.collect_trails(parent, on_path) {
                trail.push(category_id.to_string());
                trails.push(trail);
            }
        }

        on_path.remove(category_id);

        if trails.is_empty() {
            trails.push(vec![category_id.to_string()]);
        }
        trails
    }
}

impl CategoryHierarchyProvider for CatalogSnapshot {
    fn memberships(&self, product_id: &str) -> Result<Vec<String>, RepositoryError> {
        Ok(self
            .category_members
            .get(product_id)
            .cloned()
            .unwrap_or_default())
    }

    fn trails(&self, category_id: &str) -> Result<Vec<Vec<String>>, RepositoryError> {
        Ok(self.collect_trails(category_id, &mut HashSet::new()))
    }
}

impl CatalogMembershipProvider for CatalogSnapshot {
    fn catalogs_of(&self, category_id: &str) -> Result<Vec<String>, RepositoryError> {
        Ok(self
            .catalog_categories
            .get(category_id)
            .cloned()
            .unwrap_or_default())
    }
}

impl FeatureSetProvider for CatalogSnapshot {
    fn features(&self, product_id: &str) -> Result<Vec<String>, RepositoryError> {
        Ok(self.features.get(product_id).cloned().unwrap_or_default())
    }
}

impl InventoryProvider for CatalogSnapshot {
    fn available_to_promise(&self, product_id: &str) -> Result<Option<Decimal>, RepositoryError> {
        Ok(self.inventory.get(product_id).copied())
    }
}

impl ProductNatureProvider for CatalogSnapshot {
    fn is_virtual(&self, product_id: &str) -> Result<bool, RepositoryError> {
        Ok(self.virtual_products.contains(product_id))
    }

    fn is_variant(&self, product_id: &str) -> Result<bool, RepositoryError> {
        Ok(self.variant_products.contains(product_id))
    }

    fn is_digital(&self, product: &ProductRecord) -> bool {
        product
            .product_type()
            .is_some_and(|t| DIGITAL_TYPES.contains(&t))
    }

    fn is_physical(&self, product: &ProductRecord) -> bool {
        !product
            .product_type()
            .is_some_and(|t| NON_PHYSICAL_TYPES.contains(&t))
    }
}

/// Price configuration over an [`AggregatedPriceSheet`].
struct SheetPriceConfig {
    sheet: AggregatedPriceSheet,
    selected: Vec<usize>,
}

impl SheetPriceConfig {
    fn selected_options(&self) -> impl Iterator<Item = &PricedOption> {
        self.selected.iter().filter_map(|&i| self.sheet.options.get(i))
    }
}

impl AggregatedPriceConfig for SheetPriceConfig {
    fn set_defaults(&mut self) -> Result<(), RepositoryError> {
        self.selected = self
            .sheet
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_default)
            .map(|(i, _)| i)
            .collect();
        Ok(())
    }

    fn total_list_price(&self) -> Option<Decimal> {
        let options: Decimal = self
            .selected_options()
            .filter_map(|o| o.list_price)
            .sum();
        Some(self.sheet.base.list_price.unwrap_or(Decimal::ZERO) + options)
    }

    fn total_price(&self) -> Option<Decimal> {
        let options: Decimal = self.selected_options().filter_map(|o| o.price).sum();
        Some(self.sheet.base.default_price.unwrap_or(Decimal::ZERO) + options)
    }

    fn had_original_list_price(&self) -> bool {
        self.sheet.base.list_price.is_some()
            || self.selected_options().any(|o| o.list_price.is_some())
    }
}

impl AggregatedPriceCollaborator for CatalogSnapshot {
    fn configure(
        &self,
        request: &AggregatedPriceRequest<'_>,
    ) -> Result<Box<dyn AggregatedPriceConfig>, RepositoryError> {
        let product_id = request.product.product_id.as_str();
        debug!(
            product_id,
            currency = ?request.currency,
            locale = %request.locale,
            "Configuring aggregated price"
        );

        let sheet = self
            .aggregated_prices
            .get(product_id)
            .cloned()
            .unwrap_or_default();

        Ok(Box::new(SheetPriceConfig {
            sheet,
            selected: Vec::new(),
        }))
    }
}

impl SimplePriceCollaborator for CatalogSnapshot {
    fn calculate(&self, request: &SimplePriceRequest<'_>) -> Result<SimplePriceResult, RepositoryError> {
        Ok(self
            .prices
            .get(&request.product.product_id)
            .copied()
            .unwrap_or_default())
    }
}

impl LocaleConfigProvider for CatalogSnapshot {
    fn active_locales(&self, _store_id: Option<&str>) -> Result<Vec<Locale>, RepositoryError> {
        Ok(self.locales.active.clone())
    }

    fn default_price_locale(&self, _store_id: Option<&str>) -> Result<Locale, RepositoryError> {
        Ok(self.locales.default_price_locale.clone())
    }
}

impl ContentLocalizer for CatalogSnapshot {
    fn text(
        &self,
        product: &ProductRecord,
        kind: ContentKind,
        locale: &Locale,
    ) -> Result<Option<String>, RepositoryError> {
        Ok(self
            .localized_content
            .get(&product.product_id)
            .and_then(|by_locale| by_locale.get(locale.as_str()))
            .and_then(|by_kind| by_kind.get(&kind))
            .cloned())
    }
}

impl InterfaceDescriptorLookup for CatalogSnapshot {
    fn describe(&self, interface_name: &str) -> Result<ServiceDescriptor, RepositoryError> {
        self.interfaces.get(interface_name).cloned().ok_or_else(|| {
            RepositoryError::configuration(format!("Unknown service interface '{}'", interface_name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::from_json_str(
            r#"{
                "products": [
                    {"productId": "P1", "productTypeId": "FINISHED_GOOD", "fields": {"productName": "Chair"}},
                    {"productId": "B1", "productTypeId": "AGGREGATED"}
                ],
                "categoryMembers": {"P1": ["chairs"]},
                "categoryParents": {
                    "chairs": ["furniture", "sale"],
                    "furniture": ["root"],
                    "loopA": ["loopB"],
                    "loopB": ["loopA"]
                },
                "catalogCategories": {"root": ["MAIN"]},
                "inventory": {"P1": "12.75"},
                "virtualProducts": ["P1"],
                "prices": {"P1": {"listPrice": "10.005", "defaultPrice": "8"}},
                "aggregatedPrices": {
                    "B1": {
                        "base": {"defaultPrice": "100"},
                        "options": [
                            {"optionId": "O1", "listPrice": "20", "price": "15", "isDefault": true},
                            {"optionId": "O2", "listPrice": "30", "price": "25"}
                        ]
                    }
                },
                "locales": {"active": ["en_US", "fr_FR"], "defaultPriceLocale": "en_US"},
                "localizedContent": {"P1": {"fr_FR": {"PRODUCT_NAME": "Chaise"}}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_trails_follow_every_parent() {
        let snapshot = snapshot();
        let trails = snapshot.trails("chairs").unwrap();
        assert_eq!(
            trails,
            vec![
                vec!["root".to_string(), "furniture".to_string(), "chairs".to_string()],
                vec!["sale".to_string(), "chairs".to_string()],
            ]
        );
    }

    #[test]
    fn test_trails_tolerate_cycles() {
        let snapshot = snapshot();
        let trails = snapshot.trails("loopA").unwrap();
        assert_eq!(trails, vec![vec!["loopB".to_string(), "loopA".to_string()]]);
    }

    #[test]
    fn test_unknown_category_is_its_own_root() {
        let snapshot = snapshot();
        assert_eq!(snapshot.trails("orphan").unwrap(), vec![vec!["orphan".to_string()]]);
        assert!(snapshot.catalogs_of("orphan").unwrap().is_empty());
    }

    #[test]
    fn test_simple_lookups() {
        let snapshot = snapshot();
        let product = snapshot.product("P1").unwrap().clone();

        assert_eq!(snapshot.memberships("P1").unwrap(), vec!["chairs"]);
        assert!(snapshot.memberships("B1").unwrap().is_empty());
        assert_eq!(snapshot.available_to_promise("P1").unwrap(), Some(dec("12.75")));
        assert_eq!(snapshot.available_to_promise("B1").unwrap(), None);
        assert!(snapshot.is_virtual("P1").unwrap());
        assert!(!snapshot.is_variant("P1").unwrap());
        assert!(!snapshot.is_digital(&product));
        assert!(snapshot.is_physical(&product));
        assert_eq!(
            snapshot
                .text(&product, ContentKind::ProductName, &Locale::new("fr_FR"))
                .unwrap(),
            Some("Chaise".to_string())
        );
        assert_eq!(
            snapshot
                .text(&product, ContentKind::Description, &Locale::new("fr_FR"))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_digital_products_are_not_physical() {
        let snapshot = CatalogSnapshot::new();
        let product = ProductRecord::new("D1").with_type("DIGITAL_GOOD");
        assert!(snapshot.is_digital(&product));
        assert!(!snapshot.is_physical(&product));
    }

    #[test]
    fn test_aggregated_totals_need_default_selection() {
        let snapshot = snapshot();
        let product = snapshot.product("B1").unwrap().clone();
        let locale = Locale::new("en_US");
        let request = AggregatedPriceRequest {
            product: &product,
            currency: None,
            locale: &locale,
            principal: None,
        };

        let mut config = snapshot.configure(&request).unwrap();
        assert_eq!(config.total_price(), Some(dec("100")));
        assert_eq!(config.total_list_price(), Some(Decimal::ZERO));
        assert!(!config.had_original_list_price());

        config.set_defaults().unwrap();
        assert_eq!(config.total_price(), Some(dec("115")));
        assert_eq!(config.total_list_price(), Some(dec("20")));
        assert!(config.had_original_list_price());
    }

    #[test]
    fn test_standard_interface_is_available_by_default() {
        let snapshot = CatalogSnapshot::from_json_str("{}").unwrap();
        let descriptor = snapshot.describe(PRODUCT_ATTRIBUTES_INTERFACE).unwrap();
        let names = descriptor.input_parameter_names(true, false);
        assert_eq!(names.first().map(String::as_str), Some("productId"));
        assert!(!names.contains(&"userLogin".to_string()));

        let err = snapshot.describe("missing").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_invalid_json_is_a_storage_error() {
        let err = CatalogSnapshot::from_json_str("{").unwrap_err();
        assert!(matches!(err, RepositoryError::StorageError(_)));
    }
}
