//! Exchange rates against a base currency

use super::SharedTransport;
use crate::client::Request;
use crate::error::GeoError;
use crate::fallback::FallbackGenerator;
use crate::normalize::exchange_rates::parse_rates;
use crate::resilient::{resilient_fetch, DataSource, Sourced};
use crate::types::ExchangeRateTable;

#[derive(Clone)]
pub struct ExchangeRateAdapter {
    transport: SharedTransport,
    base_url: String,
    fallback: FallbackGenerator,
}

impl ExchangeRateAdapter {
    pub fn new(transport: SharedTransport, base_url: &str, fallback: FallbackGenerator) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback,
        }
    }

    pub async fn rates(&self, base: &str) -> Sourced<ExchangeRateTable> {
        let base = base.trim().to_uppercase();
        let request = Request::json(format!("{}/{}", self.base_url, base));

        resilient_fetch(
            DataSource::ExchangeRateApi,
            &base,
            async {
                let body = self.transport.get(&request).await?;
                parse_rates(&body, &base)
            },
            |table: &ExchangeRateTable| {
                if table.rates.is_empty() {
                    return Err(GeoError::Malformed("empty rate table".to_string()));
                }
                Ok(())
            },
            || self.fallback.exchange_rates(&base),
        )
        .await
    }
}
