//! Product price resolution.
//!
//! Prices are rounded to two places with ties going toward zero, the same
//! rule the stored prices were written with, so that range filters over the
//! indexed values agree with the database.

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use catalog_indexer_repository::{
    AggregatedPriceCollaborator, AggregatedPriceRequest, LocaleConfigProvider, RepositoryError,
    SimplePriceCollaborator, SimplePriceRequest,
};
use catalog_indexer_shared::{PriceResult, ProductRecord, RequestContext};

/// Type tag of products priced as the sum of their configured options.
pub const AGGREGATED_PRODUCT_TYPE: &str = "AGGREGATED";

const PRICE_SCALE: u32 = 2;

/// Round to two places, half toward zero, always keeping two digits.
pub fn round_price(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointTowardZero);
    rounded.rescale(PRICE_SCALE);
    rounded
}

/// How a product's price is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingStrategy {
    /// Configure the bundle with its default options and sum them up.
    Aggregated,
    /// Ask the price calculation directly.
    Simple,
}

impl PricingStrategy {
    pub fn for_product(product: &ProductRecord) -> Self {
        match product.product_type() {
            Some(AGGREGATED_PRODUCT_TYPE) => PricingStrategy::Aggregated,
            _ => PricingStrategy::Simple,
        }
    }
}

/// Computes the list and default price of a product.
pub struct PriceResolver {
    aggregated: Arc<dyn AggregatedPriceCollaborator>,
    simple: Arc<dyn SimplePriceCollaborator>,
    locales: Arc<dyn LocaleConfigProvider>,
    currency: Option<String>,
    store_id: Option<String>,
}

impl PriceResolver {
    pub fn new(
        aggregated: Arc<dyn AggregatedPriceCollaborator>,
        simple: Arc<dyn SimplePriceCollaborator>,
        locales: Arc<dyn LocaleConfigProvider>,
    ) -> Self {
        Self {
            aggregated,
            simple,
            locales,
            currency: None,
            store_id: None,
        }
    }

    /// Price in this currency instead of the collaborators' default.
    pub fn with_currency(mut self, currency: Option<String>) -> Self {
        self.currency = currency;
        self
    }

    /// Scope locale lookups to a store.
    pub fn with_store(mut self, store_id: Option<String>) -> Self {
        self.store_id = store_id;
        self
    }

    pub fn resolve_price(
        &self,
        product: &ProductRecord,
        context: &RequestContext,
    ) -> Result<PriceResult, RepositoryError> {
        let strategy = PricingStrategy::for_product(product);
        let result = match strategy {
            PricingStrategy::Aggregated => self.aggregated_price(product, context)?,
            PricingStrategy::Simple => self.simple_price(product, context)?,
        };

        debug!(
            product_id = %product.product_id,
            ?strategy,
            list_price = ?result.list_price,
            default_price = ?result.default_price,
            "Resolved product price"
        );
        Ok(result)
    }

    fn aggregated_price(
        &self,
        product: &ProductRecord,
        context: &RequestContext,
    ) -> Result<PriceResult, RepositoryError> {
        let locale = self.locales.default_price_locale(self.store_id.as_deref())?;
        let request = AggregatedPriceRequest {
            product,
            currency: self.currency.as_deref(),
            locale: &locale,
            principal: context.principal(),
        };

        let mut config = self.aggregated.configure(&request)?;
        config.set_defaults()?;

        // The configurator reports zero when nothing had a list price; a zero
        // list price is only kept when one was actually recorded.
        let list_price = config
            .total_list_price()
            .map(round_price)
            .filter(|p| !p.is_zero() || config.had_original_list_price());

        Ok(PriceResult {
            list_price,
            default_price: config.total_price().map(round_price),
        })
    }

    fn simple_price(
        &self,
        product: &ProductRecord,
        context: &RequestContext,
    ) -> Result<PriceResult, RepositoryError> {
        let request = SimplePriceRequest {
            product,
            currency: self.currency.as_deref(),
            passthrough: context,
        };
        let prices = self.simple.calculate(&request)?;

        Ok(PriceResult {
            list_price: prices.list_price.map(round_price),
            default_price: prices.default_price.map(round_price),
        })
    }
}
