//! Alpha Vantage index and commodity quotes

use super::SharedTransport;
use crate::client::Request;
use crate::error::{GeoError, Result};
use crate::fallback::tables::{COMMODITIES, GLOBAL_INDICES};
use crate::fallback::FallbackGenerator;
use crate::normalize::alpha_vantage::parse_global_quote;
use crate::resilient::{resilient_fetch, DataSource, Sourced};
use crate::types::{Instrument, MarketQuote};
use chrono::Utc;
use futures_util::future::join_all;
use rust_decimal::Decimal;

#[derive(Clone)]
pub struct MarketAdapter {
    transport: SharedTransport,
    base_url: String,
    api_key: String,
    fallback: FallbackGenerator,
}

impl MarketAdapter {
    pub fn new(
        transport: SharedTransport,
        base_url: &str,
        api_key: &str,
        fallback: FallbackGenerator,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            fallback,
        }
    }

    pub async fn quote(&self, instrument: &Instrument) -> Sourced<MarketQuote> {
        let request = Request::json(&self.base_url)
            .param("function", "GLOBAL_QUOTE")
            .param("symbol", instrument.symbol.as_ref())
            .param("apikey", self.api_key.as_str());

        resilient_fetch(
            DataSource::AlphaVantage,
            &instrument.symbol,
            async {
                let body = self.transport.get(&request).await?;
                parse_global_quote(&body, instrument)
            },
            validate_quote,
            || self.fallback.quote(instrument, Utc::now().date_naive()),
        )
        .await
    }

    /// Quotes in input order, fetched concurrently
    pub async fn quotes(&self, instruments: &[Instrument]) -> Vec<MarketQuote> {
        join_all(instruments.iter().map(|i| self.quote(i)))
            .await
            .into_iter()
            .map(Sourced::into_inner)
            .collect()
    }

    /// First `count` tracked indices
    pub async fn indices(&self, count: usize) -> Vec<MarketQuote> {
        self.quotes(&GLOBAL_INDICES[..count.min(GLOBAL_INDICES.len())])
            .await
    }

    /// First `count` tracked commodities
    pub async fn commodities(&self, count: usize) -> Vec<MarketQuote> {
        self.quotes(&COMMODITIES[..count.min(COMMODITIES.len())])
            .await
    }
}

fn validate_quote(quote: &MarketQuote) -> Result<()> {
    if quote.price <= Decimal::ZERO {
        return Err(GeoError::Malformed(format!(
            "non-positive price for {}",
            quote.symbol
        )));
    }
    Ok(())
}
