//! Alpha Vantage `GLOBAL_QUOTE` responses
//!
//! Quota exhaustion arrives as a 200 with a `Note` or `Information` field
//! and no quote; an unknown symbol arrives as an empty `Global Quote`.

use crate::error::{GeoError, Result};
use crate::types::{Instrument, MarketQuote};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "Global Quote")]
    quote: Option<HashMap<String, String>>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

pub fn parse_global_quote(body: &str, instrument: &Instrument) -> Result<MarketQuote> {
    let envelope: QuoteEnvelope = serde_json::from_str(body)?;

    if let Some(message) = envelope.note.or(envelope.information) {
        return Err(GeoError::RateLimited {
            source_name: "alpha_vantage".to_string(),
            message,
        });
    }
    if let Some(message) = envelope.error_message {
        return Err(GeoError::Malformed(message));
    }

    let quote = envelope
        .quote
        .filter(|q| !q.is_empty())
        .ok_or_else(|| GeoError::Malformed(format!("no quote for {}", instrument.symbol)))?;

    let field = |key: &str| quote.get(key).map(|s| s.trim());

    if let Some(symbol) = field("01. symbol").filter(|s| !s.is_empty()) {
        if !symbol.eq_ignore_ascii_case(&instrument.symbol) {
            return Err(GeoError::Malformed(format!(
                "quote for {} returned for {}",
                symbol, instrument.symbol
            )));
        }
    }

    let price = field("05. price")
        .and_then(|s| s.parse::<Decimal>().ok())
        .ok_or_else(|| GeoError::Malformed(format!("no price for {}", instrument.symbol)))?;

    let change = field("09. change")
        .and_then(|s| s.parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO);

    let change_percent = field("10. change percent")
        .map(|s| s.trim_end_matches('%'))
        .and_then(|s| s.parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO);

    let volume = field("06. volume")
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let last_updated = field("07. latest trading day")
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or_else(|| Utc::now().date_naive());

    Ok(MarketQuote {
        symbol: instrument.symbol.to_string(),
        name: instrument.name.to_string(),
        country: instrument.country.to_string(),
        region: instrument.region.to_string(),
        unit: instrument.unit.as_deref().map(str::to_string),
        price,
        change,
        change_percent,
        volume,
        last_updated,
        is_real_data: false,
    })
}
