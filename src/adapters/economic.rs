//! World Bank economic indicators

use super::SharedTransport;
use crate::aggregator::merge::merge_indicators;
use crate::client::Request;
use crate::fallback::tables::DEFAULT_COUNTRY;
use crate::fallback::FallbackGenerator;
use crate::normalize::world_bank::{latest_observation, Observation};
use crate::resilient::{accept_any, attempt, DataSource};
use crate::types::{EconomicIndicatorSet, Indicator};
use chrono::{Datelike, Utc};
use futures_util::future::join_all;
use tracing::{debug, info};

/// Years of history requested per series
const WINDOW_YEARS: i32 = 5;

#[derive(Clone)]
pub struct EconomicAdapter {
    transport: SharedTransport,
    base_url: String,
    fallback: FallbackGenerator,
}

impl EconomicAdapter {
    pub fn new(transport: SharedTransport, base_url: &str, fallback: FallbackGenerator) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback,
        }
    }

    /// All eight series for `country`, merged field by field over the
    /// fallback table
    pub async fn indicators(&self, country: &str) -> EconomicIndicatorSet {
        let code = country_code(country);
        let year = Utc::now().year();

        let code_ref = code.as_str();
        let observations = join_all(Indicator::ALL.into_iter().map(|indicator| async move {
            (indicator, self.series(code_ref, indicator, year).await)
        }))
        .await;

        let merged = merge_indicators(self.fallback.economic_indicators(&code), &observations);
        info!(
            "Economic indicators for {}: {}/{} series live, real={}",
            code,
            merged.real_fields.len(),
            Indicator::ALL.len(),
            merged.is_real_data
        );
        merged
    }

    /// Latest observation of one series inside the five-year window
    pub async fn series(&self, code: &str, indicator: Indicator, year: i32) -> Option<Observation> {
        let request = Request::json(format!(
            "{}/country/{}/indicator/{}",
            self.base_url,
            code,
            indicator.code()
        ))
        .param("format", "json")
        .param("date", format!("{}:{}", year - WINDOW_YEARS, year))
        .param("per_page", "10");

        let what = format!("{} {}", code, indicator);
        let observation = attempt(
            DataSource::WorldBank,
            &what,
            async {
                let body = self.transport.get(&request).await?;
                latest_observation(&body)
            },
            accept_any,
        )
        .await
        .flatten();

        if observation.is_none() {
            debug!("{}: no value, field falls back", what);
        }
        observation
    }
}

fn country_code(raw: &str) -> String {
    match raw.trim() {
        "" => DEFAULT_COUNTRY.to_string(),
        code => code.to_uppercase(),
    }
}
