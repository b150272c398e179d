//! Pricing collaborators.
//!
//! Two independent strategies exist: a stateful configurator for aggregated
//! (bundle) products, whose price is the sum of the selected options, and a
//! stateless calculation for every other product.

use rust_decimal::Decimal;

use crate::errors::RepositoryError;
use crate::types::{AggregatedPriceRequest, SimplePriceRequest, SimplePriceResult};

/// A per-call price configuration for one aggregated product.
///
/// Totals only reflect option prices once a selection has been made, so
/// callers apply [`AggregatedPriceConfig::set_defaults`] before reading them.
pub trait AggregatedPriceConfig: Send {
    /// Select the default option of every configurable slot.
    fn set_defaults(&mut self) -> Result<(), RepositoryError>;

    /// Sum of list prices of the base product and the selected options.
    ///
    /// Reported as zero rather than `None` when nothing has a list price;
    /// use [`AggregatedPriceConfig::had_original_list_price`] to tell the two
    /// apart.
    fn total_list_price(&self) -> Option<Decimal>;

    /// Sum of actual prices of the base product and the selected options.
    fn total_price(&self) -> Option<Decimal>;

    /// Whether any priced component carried a list price of its own.
    fn had_original_list_price(&self) -> bool;
}

/// Builds price configurations for aggregated products.
pub trait AggregatedPriceCollaborator: Send + Sync {
    /// Seed a configuration for the product in the request.
    ///
    /// # Returns
    ///
    /// * `Ok(Box<dyn AggregatedPriceConfig>)` - A fresh, unselected configuration
    /// * `Err(RepositoryError)` - If the product cannot be configured
    fn configure(
        &self,
        request: &AggregatedPriceRequest<'_>,
    ) -> Result<Box<dyn AggregatedPriceConfig>, RepositoryError>;
}

/// Calculates prices for non-aggregated products.
pub trait SimplePriceCollaborator: Send + Sync {
    fn calculate(&self, request: &SimplePriceRequest<'_>) -> Result<SimplePriceResult, RepositoryError>;
}
