//! Try-remote-then-degrade wrapper shared by every adapter
//!
//! A remote call is attempted exactly once. Transport failures, non-success
//! statuses, malformed payloads and shape-validation failures are all logged
//! and replaced by fallback output. Provenance flags are set here and nowhere
//! else, so synthetic output can never carry a "real" flag.

use crate::error::Result;
use crate::types::{CountryInfo, ExchangeRateTable, MarketQuote, NewsArticle};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, warn};

/// Remote data source identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    WorldBank,
    AlphaVantage,
    GoogleNews,
    NewsApi,
    ExchangeRateApi,
    RestCountries,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::WorldBank => write!(f, "world_bank"),
            DataSource::AlphaVantage => write!(f, "alpha_vantage"),
            DataSource::GoogleNews => write!(f, "google_news"),
            DataSource::NewsApi => write!(f, "news_api"),
            DataSource::ExchangeRateApi => write!(f, "exchange_rate_api"),
            DataSource::RestCountries => write!(f, "rest_countries"),
        }
    }
}

/// Where a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Live(DataSource),
    Synthetic,
}

impl Origin {
    pub fn is_live(&self) -> bool {
        matches!(self, Origin::Live(_))
    }
}

/// Records carrying provenance flags
pub trait MarkOrigin {
    fn mark_origin(&mut self, origin: Origin);
}

impl MarkOrigin for MarketQuote {
    fn mark_origin(&mut self, origin: Origin) {
        self.is_real_data = origin.is_live();
    }
}

impl MarkOrigin for ExchangeRateTable {
    fn mark_origin(&mut self, origin: Origin) {
        self.is_real_data = origin.is_live();
    }
}

impl MarkOrigin for CountryInfo {
    fn mark_origin(&mut self, origin: Origin) {
        self.is_real_data = origin.is_live();
    }
}

impl MarkOrigin for NewsArticle {
    fn mark_origin(&mut self, origin: Origin) {
        self.is_google_news = origin == Origin::Live(DataSource::GoogleNews);
        self.is_fresh = origin.is_live();
    }
}

impl<T: MarkOrigin> MarkOrigin for Vec<T> {
    fn mark_origin(&mut self, origin: Origin) {
        for item in self.iter_mut() {
            item.mark_origin(origin);
        }
    }
}

/// Value tagged with its origin
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Sourced<T> {
    pub fn is_real(&self) -> bool {
        self.origin.is_live()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: MarkOrigin> Sourced<T> {
    pub fn live(source: DataSource, mut value: T) -> Self {
        let origin = Origin::Live(source);
        value.mark_origin(origin);
        Self { value, origin }
    }

    pub fn synthetic(mut value: T) -> Self {
        value.mark_origin(Origin::Synthetic);
        Self {
            value,
            origin: Origin::Synthetic,
        }
    }
}

/// Run one remote call and validate its shape. Failures are logged and
/// swallowed.
pub async fn attempt<T, Fut, V>(
    source: DataSource,
    what: &str,
    remote: Fut,
    validate: V,
) -> Option<T>
where
    Fut: Future<Output = Result<T>>,
    V: FnOnce(&T) -> Result<()>,
{
    let outcome = match remote.await {
        Ok(value) => validate(&value).map(|_| value),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(value) => {
            debug!("{} {}: live data", source, what);
            Some(value)
        }
        Err(e) => {
            warn!("{} {} failed: {}", source, what, e);
            None
        }
    }
}

/// Remote call with validation, degrading to `fallback` on any failure
pub async fn resilient_fetch<T, Fut, V, G>(
    source: DataSource,
    what: &str,
    remote: Fut,
    validate: V,
    fallback: G,
) -> Sourced<T>
where
    T: MarkOrigin,
    Fut: Future<Output = Result<T>>,
    V: FnOnce(&T) -> Result<()>,
    G: FnOnce() -> T,
{
    match attempt(source, what, remote, validate).await {
        Some(value) => Sourced::live(source, value),
        None => {
            debug!("{} {}: using synthetic data", source, what);
            Sourced::synthetic(fallback())
        }
    }
}

/// Validator that accepts anything
pub fn accept_any<T>(_: &T) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoError;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn rates(real: bool) -> ExchangeRateTable {
        let mut rates = BTreeMap::new();
        rates.insert("EUR".to_string(), dec!(0.9));
        ExchangeRateTable {
            base: "USD".to_string(),
            rates,
            is_real_data: real,
        }
    }

    #[tokio::test]
    async fn test_success_marks_real() {
        let result = resilient_fetch(
            DataSource::ExchangeRateApi,
            "rates",
            async { Ok(rates(false)) },
            accept_any,
            || rates(false),
        )
        .await;

        assert!(result.is_real());
        assert!(result.value.is_real_data);
        assert_eq!(result.origin, Origin::Live(DataSource::ExchangeRateApi));
    }

    #[tokio::test]
    async fn test_failure_uses_fallback() {
        let result = resilient_fetch(
            DataSource::ExchangeRateApi,
            "rates",
            async { Err(GeoError::Connection("down".to_string())) },
            accept_any,
            || rates(true),
        )
        .await;

        assert!(!result.is_real());
        // Fallback output is always re-marked synthetic
        assert!(!result.value.is_real_data);
    }

    #[tokio::test]
    async fn test_validation_failure_uses_fallback() {
        let result = resilient_fetch(
            DataSource::ExchangeRateApi,
            "rates",
            async { Ok(rates(false)) },
            |_: &ExchangeRateTable| Err(GeoError::Malformed("rejected".to_string())),
            || rates(false),
        )
        .await;

        assert_eq!(result.origin, Origin::Synthetic);
    }

    #[tokio::test]
    async fn test_attempt_returns_none_on_error() {
        let value: Option<u32> = attempt(
            DataSource::WorldBank,
            "series",
            async { Err(GeoError::Status { status: 500, url: "x".to_string() }) },
            accept_any,
        )
        .await;
        assert!(value.is_none());
    }

    #[test]
    fn test_article_flags_by_origin() {
        let mut article = NewsArticle {
            id: "1".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            url: "u".to_string(),
            image_url: None,
            published_at: Utc::now(),
            source_name: "s".to_string(),
            category: crate::types::Category::General,
            is_google_news: false,
            is_fresh: false,
            analysis: None,
        };

        article.mark_origin(Origin::Live(DataSource::GoogleNews));
        assert!(article.is_google_news && article.is_fresh);

        article.mark_origin(Origin::Live(DataSource::NewsApi));
        assert!(!article.is_google_news && article.is_fresh);

        article.mark_origin(Origin::Synthetic);
        assert!(!article.is_google_news && !article.is_fresh);
        assert!(!article.is_real_data());
    }

    #[test]
    fn test_data_source_display() {
        assert_eq!(DataSource::WorldBank.to_string(), "world_bank");
        assert_eq!(DataSource::GoogleNews.to_string(), "google_news");
    }
}
