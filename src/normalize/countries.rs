//! REST Countries `/name/{name}` responses

use crate::error::{GeoError, Result};
use crate::types::CountryInfo;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct RawCountry {
    name: RawName,
    #[serde(default)]
    population: u64,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    region: String,
    #[serde(default)]
    currencies: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawName {
    common: String,
}

/// First match of a name search
pub fn parse_country(body: &str) -> Result<CountryInfo> {
    let matches: Vec<RawCountry> = serde_json::from_str(body)?;
    let country = matches
        .into_iter()
        .next()
        .ok_or_else(|| GeoError::Malformed("no country matched".to_string()))?;

    Ok(CountryInfo {
        name: country.name.common,
        population: country.population,
        capital: country.capital,
        region: country.region,
        currencies: country.currencies.into_keys().collect(),
        is_real_data: false,
    })
}
