//! Source adapters
//!
//! One adapter per remote source. Each one attempts a single remote call per
//! request and degrades to synthetic output on any failure; none of them
//! return errors to the caller.

mod country;
mod economic;
mod exchange;
mod market;
mod news;
#[cfg(test)]
mod tests;

pub use country::CountryAdapter;
pub use economic::EconomicAdapter;
pub use exchange::ExchangeRateAdapter;
pub use market::MarketAdapter;
pub use news::NewsAdapter;

use crate::client::HttpTransport;
use crate::config::Config;
use crate::fallback::FallbackGenerator;
use std::sync::Arc;

pub type SharedTransport = Arc<dyn HttpTransport>;

/// Every adapter wired to one transport and one fallback generator
#[derive(Clone)]
pub struct Adapters {
    pub economic: EconomicAdapter,
    pub markets: MarketAdapter,
    pub news: NewsAdapter,
    pub rates: ExchangeRateAdapter,
    pub countries: CountryAdapter,
}

impl Adapters {
    pub fn new(config: &Config, transport: SharedTransport, generator: FallbackGenerator) -> Self {
        let endpoints = &config.endpoints;
        Self {
            economic: EconomicAdapter::new(
                transport.clone(),
                &endpoints.world_bank_url,
                generator.clone(),
            ),
            markets: MarketAdapter::new(
                transport.clone(),
                &endpoints.alpha_vantage_url,
                &config.keys.alpha_vantage,
                generator.clone(),
            ),
            news: NewsAdapter::new(transport.clone(), config, generator.clone()),
            rates: ExchangeRateAdapter::new(
                transport.clone(),
                &endpoints.exchange_rates_url,
                generator.clone(),
            ),
            countries: CountryAdapter::new(transport, &endpoints.rest_countries_url, generator),
        }
    }
}
