//! Request and response types exchanged with collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_indexer_shared::{Locale, ProductRecord, RequestContext};

/// The three localizable text kinds of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    ProductName,
    Description,
    LongDescription,
}

impl ContentKind {
    /// All kinds, in document order.
    pub const ALL: [ContentKind; 3] = [
        ContentKind::ProductName,
        ContentKind::Description,
        ContentKind::LongDescription,
    ];

    /// Content type id understood by the localizer.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::ProductName => "PRODUCT_NAME",
            ContentKind::Description => "DESCRIPTION",
            ContentKind::LongDescription => "LONG_DESCRIPTION",
        }
    }

    /// Product record field holding the non-localized text.
    pub fn storage_field(&self) -> &'static str {
        match self {
            ContentKind::ProductName => "productName",
            ContentKind::Description => "description",
            ContentKind::LongDescription => "longDescription",
        }
    }
}

/// Direction of a declared service parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterMode {
    In,
    Out,
    InOut,
}

impl ParameterMode {
    /// Whether the parameter is accepted as input.
    pub fn is_input(&self) -> bool {
        matches!(self, ParameterMode::In | ParameterMode::InOut)
    }
}

/// One declared parameter of a service interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub mode: ParameterMode,
    #[serde(default)]
    pub optional: bool,
    /// Framework-supplied parameter (principal, locale, ...) not set by callers.
    #[serde(default)]
    pub internal: bool,
}

impl ParameterDescriptor {
    /// An optional, non-internal input parameter.
    pub fn input(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: ParameterMode::In,
            optional: true,
            internal: false,
        }
    }

    /// An internal input parameter.
    pub fn internal(name: impl Into<String>) -> Self {
        Self {
            internal: true,
            ..Self::input(name)
        }
    }
}

/// Name of the interface declaring the simple product document fields.
pub const PRODUCT_ATTRIBUTES_INTERFACE: &str = "solrProductAttributesSimple";

/// Declared shape of a named service interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl ServiceDescriptor {
    /// Names of the input parameters, in declaration order.
    pub fn input_parameter_names(&self, include_optional: bool, include_internal: bool) -> Vec<String> {
        self.parameters
            .iter()
            .filter(|p| p.mode.is_input())
            .filter(|p| include_optional || !p.optional)
            .filter(|p| include_internal || !p.internal)
            .map(|p| p.name.clone())
            .collect()
    }
}

/// Input to the aggregated (bundle) price configuration.
#[derive(Debug, Clone, Copy)]
pub struct AggregatedPriceRequest<'a> {
    pub product: &'a ProductRecord,
    /// Currency to price in; `None` defers to the collaborator's default.
    pub currency: Option<&'a str>,
    pub locale: &'a Locale,
    pub principal: Option<&'a str>,
}

/// Input to the simple price calculation.
#[derive(Debug, Clone, Copy)]
pub struct SimplePriceRequest<'a> {
    pub product: &'a ProductRecord,
    /// Currency to price in; `None` defers to the collaborator's default.
    pub currency: Option<&'a str>,
    /// Caller state forwarded untouched.
    pub passthrough: &'a RequestContext,
}

/// Unrounded prices returned by the simple price calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplePriceResult {
    #[serde(default)]
    pub list_price: Option<Decimal>,
    #[serde(default)]
    pub default_price: Option<Decimal>,
}
