//! World Bank indicator pages
//!
//! A page is a two-element array: paging metadata, then observations (or
//! `null` when the window has none). Invalid country codes come back as a
//! single-element array carrying a `message` list.

use crate::error::{GeoError, Result};
use serde::Deserialize;

/// Latest non-null value of one series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub value: f64,
    pub year: i32,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: Option<String>,
    value: Option<f64>,
}

/// Most recent non-null observation on the page, `None` if the window is empty
pub fn latest_observation(body: &str) -> Result<Option<Observation>> {
    let page: serde_json::Value = serde_json::from_str(body)?;
    let parts = page
        .as_array()
        .ok_or_else(|| GeoError::Malformed("World Bank page is not an array".to_string()))?;

    if let Some(message) = parts.first().and_then(|meta| meta.get("message")) {
        return Err(GeoError::Malformed(format!("World Bank rejected request: {}", message)));
    }

    let rows = match parts.get(1) {
        Some(serde_json::Value::Array(rows)) => rows,
        Some(serde_json::Value::Null) | None => return Ok(None),
        Some(_) => {
            return Err(GeoError::Malformed(
                "World Bank observations are not an array".to_string(),
            ))
        }
    };

    let latest = rows
        .iter()
        .filter_map(|row| serde_json::from_value::<RawObservation>(row.clone()).ok())
        .filter_map(|row| {
            let value = row.value?;
            let year = row.date.as_deref().and_then(parse_year)?;
            Some(Observation { value, year })
        })
        .max_by_key(|obs| obs.year);

    Ok(latest)
}

fn parse_year(date: &str) -> Option<i32> {
    date.get(..4)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_non_null() {
        let body = r#"[
            {"page":1,"pages":1,"per_page":10,"total":3},
            [
                {"date":"2024","value":null},
                {"date":"2023","value":25462700000000},
                {"date":"2022","value":23315080560000}
            ]
        ]"#;
        let obs = latest_observation(body).unwrap().unwrap();
        assert_eq!(obs.year, 2023);
        assert_eq!(obs.value, 25462700000000.0);
    }

    #[test]
    fn test_all_null_is_none() {
        let body = r#"[{"page":1},[{"date":"2024","value":null},{"date":"2023","value":null}]]"#;
        assert!(latest_observation(body).unwrap().is_none());
    }

    #[test]
    fn test_null_rows_is_none() {
        let body = r#"[{"page":0,"pages":0,"total":0},null]"#;
        assert!(latest_observation(body).unwrap().is_none());
    }

    #[test]
    fn test_error_message_is_malformed() {
        let body = r#"[{"message":[{"id":"120","key":"Invalid value","value":"The provided parameter value is not valid"}]}]"#;
        let err = latest_observation(body).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_not_json() {
        assert!(latest_observation("<html>").is_err());
    }

    #[test]
    fn test_unordered_rows_pick_latest_year() {
        let body = r#"[{},[{"date":"2020","value":1.5},{"date":"2022","value":2.5},{"date":"2021","value":3.5}]]"#;
        let obs = latest_observation(body).unwrap().unwrap();
        assert_eq!(obs.year, 2022);
        assert_eq!(obs.value, 2.5);
    }
}
