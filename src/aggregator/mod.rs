//! View aggregation
//!
//! Each view fans out to the adapters it needs, waits for every call to
//! finish and returns one joined result. Adapters never fail, so neither do
//! the views.

pub mod merge;

use crate::adapters::{Adapters, SharedTransport};
use crate::analysis::annotate;
use crate::client::HttpClient;
use crate::config::{Config, MarketConfig};
use crate::error::Result;
use crate::fallback::tables;
use crate::fallback::FallbackGenerator;
use crate::resilient::Origin;
use crate::types::{
    CalendarEvent, Category, CountryInfo, EconomicIndicatorSet, ExchangeRateTable, MarketQuote,
    MarketSentiment, NewsArticle,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Indices, commodities, rates and sentiment refreshed together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub indices: Vec<MarketQuote>,
    pub commodities: Vec<MarketQuote>,
    pub exchange_rates: ExchangeRateTable,
    pub sentiment: MarketSentiment,
    pub fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Quotes that came from the remote source
    pub fn live_quotes(&self) -> usize {
        self.indices
            .iter()
            .chain(&self.commodities)
            .filter(|q| q.is_real_data)
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyDashboard {
    pub indicators: EconomicIndicatorSet,
    pub markets: MarketSnapshot,
    pub calendar: Vec<CalendarEvent>,
}

/// Annotated articles for one category or query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsFeed {
    pub articles: Vec<NewsArticle>,
    pub origin: Origin,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Aggregator {
    adapters: Adapters,
    generator: FallbackGenerator,
    markets: MarketConfig,
}

impl Aggregator {
    pub fn new(config: &Config, transport: SharedTransport, generator: FallbackGenerator) -> Self {
        Self {
            adapters: Adapters::new(config, transport, generator.clone()),
            generator,
            markets: config.markets.clone(),
        }
    }

    /// Aggregator backed by the reqwest transport
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let transport: SharedTransport = Arc::new(HttpClient::new(&config.http)?);
        let generator = FallbackGenerator::new(config.fallback.seed);
        Ok(Self::new(config, transport, generator))
    }

    pub async fn economic_indicators(&self, country: &str) -> EconomicIndicatorSet {
        self.adapters.economic.indicators(country).await
    }

    pub async fn market_snapshot(&self) -> MarketSnapshot {
        let (indices, commodities, rates) = tokio::join!(
            self.adapters.markets.indices(self.markets.index_count),
            self.adapters.markets.commodities(self.markets.commodity_count),
            self.adapters.rates.rates(&self.markets.base_currency),
        );

        let snapshot = MarketSnapshot {
            indices,
            commodities,
            exchange_rates: rates.into_inner(),
            sentiment: self.generator.market_sentiment(),
            fetched_at: Utc::now(),
        };
        info!(
            "Market snapshot: {} quotes ({} live), rates real={}",
            snapshot.indices.len() + snapshot.commodities.len(),
            snapshot.live_quotes(),
            snapshot.exchange_rates.is_real_data
        );
        snapshot
    }

    pub async fn economy_dashboard(&self, country: &str) -> EconomyDashboard {
        let (indicators, markets) =
            tokio::join!(self.economic_indicators(country), self.market_snapshot());

        EconomyDashboard {
            indicators,
            markets,
            calendar: self.generator.economic_calendar(Utc::now().date_naive()),
        }
    }

    pub async fn news_feed(&self, category: Category) -> NewsFeed {
        let sourced = self.adapters.news.category(category).await;
        info!(
            "{} news: {} articles from {:?}",
            category,
            sourced.value.len(),
            sourced.origin
        );
        self.annotated(sourced.value, sourced.origin)
    }

    /// Search results; a blank query is the general feed
    pub async fn search_news(&self, query: &str) -> NewsFeed {
        if query.trim().is_empty() {
            return self.news_feed(Category::General).await;
        }
        let sourced = self.adapters.news.search(query).await;
        info!(
            "Search '{}': {} articles from {:?}",
            query.trim(),
            sourced.value.len(),
            sourced.origin
        );
        self.annotated(sourced.value, sourced.origin)
    }

    pub async fn country_profile(&self, name: &str) -> CountryInfo {
        self.adapters.countries.country(name).await.into_inner()
    }

    pub async fn exchange_rates(&self, base: &str) -> ExchangeRateTable {
        self.adapters.rates.rates(base).await.into_inner()
    }

    /// Quote for any symbol; untracked symbols fall back around the default base
    pub async fn quote(&self, symbol: &str) -> MarketQuote {
        let instrument = tables::instrument(symbol);
        self.adapters.markets.quote(&instrument).await.into_inner()
    }

    fn annotated(&self, articles: Vec<NewsArticle>, origin: Origin) -> NewsFeed {
        NewsFeed {
            articles: annotate(articles, &self.generator),
            origin,
            fetched_at: Utc::now(),
        }
    }
}
