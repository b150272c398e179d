//! In-memory implementation of the collaborator interfaces.
//!
//! This module provides `CatalogSnapshot`, a serde-loadable picture of a
//! catalog that implements every lookup the pipeline needs.

mod snapshot;

pub use snapshot::{AggregatedPriceSheet, CatalogSnapshot, LocaleSettings, PricedOption};
