//! Resolved product prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// List and default price of a product, already rounded to two places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResult {
    /// List (pre-discount) price.
    pub list_price: Option<Decimal>,
    /// Price the product is actually sold at.
    pub default_price: Option<Decimal>,
}

impl PriceResult {
    /// Text form of the list price, e.g. `"10.00"`.
    pub fn list_price_text(&self) -> Option<String> {
        self.list_price.map(|p| p.to_string())
    }

    /// Text form of the default price.
    pub fn default_price_text(&self) -> Option<String> {
        self.default_price.map(|p| p.to_string())
    }
}
