//! REST Countries lookups

use super::SharedTransport;
use crate::client::Request;
use crate::fallback::FallbackGenerator;
use crate::normalize::countries::parse_country;
use crate::resilient::{accept_any, resilient_fetch, DataSource, Sourced};
use crate::types::CountryInfo;

#[derive(Clone)]
pub struct CountryAdapter {
    transport: SharedTransport,
    base_url: String,
    fallback: FallbackGenerator,
}

impl CountryAdapter {
    pub fn new(transport: SharedTransport, base_url: &str, fallback: FallbackGenerator) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback,
        }
    }

    /// First country matching `name`
    pub async fn country(&self, name: &str) -> Sourced<CountryInfo> {
        let name = name.trim();
        let request = Request::json(format!("{}/name/{}", self.base_url, name));

        resilient_fetch(
            DataSource::RestCountries,
            name,
            async {
                let body = self.transport.get(&request).await?;
                parse_country(&body)
            },
            accept_any,
            || self.fallback.country_info(),
        )
        .await
    }
}
