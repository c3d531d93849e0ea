//! exchangerate-api `/latest/{base}` responses

use crate::error::{GeoError, Result};
use crate::types::ExchangeRateTable;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
struct RawRates {
    base: Option<String>,
    rates: Option<BTreeMap<String, serde_json::Value>>,
}

/// Rate table keyed by currency code. Non-numeric entries are skipped.
pub fn parse_rates(body: &str, requested_base: &str) -> Result<ExchangeRateTable> {
    let raw: RawRates = serde_json::from_str(body)?;
    let rates = raw
        .rates
        .ok_or_else(|| GeoError::Malformed("response has no rates".to_string()))?;

    let rates = rates
        .into_iter()
        .filter_map(|(code, value)| {
            let text = value.as_number()?.to_string();
            let rate = Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()?;
            Some((code, rate))
        })
        .collect();

    Ok(ExchangeRateTable {
        base: raw
            .base
            .unwrap_or_else(|| requested_base.to_string())
            .to_uppercase(),
        rates,
        is_real_data: false,
    })
}
