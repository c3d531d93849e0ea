//! Synthetic data generation
//!
//! Produces records with exactly the shape the normalizers produce from real
//! payloads. Values come from fixed tables or a seedable RNG; provenance flags
//! are always false here and are set by the resilient-fetch wrapper.

pub mod tables;

use crate::types::{
    CalendarEvent, CountryInfo, EconomicIndicatorSet, ExchangeRateTable, Instrument,
    MarketBias, MarketQuote, MarketSentiment, NewsArticle, SectorBias,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::sync::Arc;
use tables::{economic_baseline, CALENDAR, HEADLINES, NEWS_SOURCES, SECTORS};

/// Half-width of the synthetic price band, as a fraction of the base price
pub const PRICE_BAND: f64 = 0.05;
/// Half-width of the synthetic change band, as a fraction of the base price
pub const CHANGE_BAND: f64 = 0.025;

/// Shared, seedable generator. Clones draw from the same stream.
#[derive(Clone)]
pub struct FallbackGenerator {
    rng: Arc<Mutex<StdRng>>,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl FallbackGenerator {
    /// Seeded when `seed` is set, otherwise seeded from the OS
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Borrow the underlying RNG
    pub fn with_rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut rng = self.rng.lock();
        f(&mut *rng)
    }

    /// Fixed-table indicators; unknown codes get the US table
    pub fn economic_indicators(&self, country_code: &str) -> EconomicIndicatorSet {
        let baseline = economic_baseline(country_code);
        EconomicIndicatorSet {
            country_code: country_code.to_uppercase(),
            gdp: baseline.gdp,
            gdp_growth: baseline.gdp_growth,
            inflation: baseline.inflation,
            unemployment: baseline.unemployment,
            literacy_rate: baseline.literacy_rate,
            population: baseline.population,
            gdp_per_capita: baseline.gdp_per_capita,
            trade_percent: baseline.trade_percent,
            data_year: Utc::now().year() - 1,
            is_real_data: false,
            real_fields: Vec::new(),
        }
    }

    /// Quote within ±5% of the instrument's base price
    pub fn quote(&self, instrument: &Instrument, today: NaiveDate) -> MarketQuote {
        let base = instrument.base_price;
        let (price, change, volume) = self.with_rng(|rng| {
            let price = base + (rng.random::<f64>() - 0.5) * 2.0 * base * PRICE_BAND;
            let change = (rng.random::<f64>() - 0.5) * 2.0 * base * CHANGE_BAND;
            let volume = rng.random_range(0..1_000_000_000u64);
            (price, change, volume)
        });

        let previous = price - change;
        let change_percent = if previous.abs() > f64::EPSILON {
            change / previous * 100.0
        } else {
            0.0
        };

        MarketQuote {
            symbol: instrument.symbol.to_string(),
            name: instrument.name.to_string(),
            country: instrument.country.to_string(),
            region: instrument.region.to_string(),
            unit: instrument.unit.as_deref().map(str::to_string),
            price: to_decimal(price, 2),
            change: to_decimal(change, 2),
            change_percent: to_decimal(change_percent, 4),
            volume,
            last_updated: today,
            is_real_data: false,
        }
    }

    /// Fixed USD-relative table labelled with the requested base
    pub fn exchange_rates(&self, base: &str) -> ExchangeRateTable {
        ExchangeRateTable {
            base: base.to_uppercase(),
            rates: tables::fallback_rates(),
            is_real_data: false,
        }
    }

    /// Synthetic headline set, published half an hour apart going back from `now`
    pub fn headlines(&self, now: DateTime<Utc>) -> Vec<NewsArticle> {
        let stamp = now.timestamp_millis();
        HEADLINES
            .iter()
            .enumerate()
            .map(|(index, headline)| NewsArticle {
                id: format!("synthetic-news-{}-{}", stamp, index),
                title: headline.title.to_string(),
                description: headline.description.to_string(),
                url: format!("https://example.com/news/{}-{}", stamp, index),
                image_url: Some(format!(
                    "https://images.pexels.com/photos/{0}/pexels-photo-{0}.jpeg",
                    6_801_648 + index
                )),
                published_at: now - Duration::minutes(30 * index as i64),
                source_name: NEWS_SOURCES[index % NEWS_SOURCES.len()].to_string(),
                category: headline.category,
                is_google_news: false,
                is_fresh: false,
                analysis: None,
            })
            .collect()
    }

    /// Synthetic headlines whose title or description contains `query`
    pub fn search_headlines(&self, query: &str, now: DateTime<Utc>) -> Vec<NewsArticle> {
        let needle = query.trim().to_lowercase();
        self.headlines(now)
            .into_iter()
            .filter(|a| {
                a.title.to_lowercase().contains(&needle)
                    || a.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn country_info(&self) -> CountryInfo {
        CountryInfo {
            name: "United States".to_string(),
            population: 331_900_000,
            capital: vec!["Washington, D.C.".to_string()],
            region: "Americas".to_string(),
            currencies: vec!["USD".to_string()],
            is_real_data: false,
        }
    }

    pub fn market_sentiment(&self) -> MarketSentiment {
        self.with_rng(|rng| {
            let overall = if rng.random_bool(0.5) {
                MarketBias::Bullish
            } else {
                MarketBias::Bearish
            };
            let fear_greed_index = rng.random_range(0..100u8);
            let volatility_index = rng.random_range(10.0..60.0);
            let sectors = SECTORS
                .iter()
                .map(|sector| {
                    let bias = match rng.random_range(0..3u8) {
                        0 => SectorBias::Positive,
                        1 => SectorBias::Neutral,
                        _ => SectorBias::Negative,
                    };
                    (sector.to_string(), bias)
                })
                .collect();

            MarketSentiment {
                overall,
                fear_greed_index,
                volatility_index,
                sectors,
            }
        })
    }

    /// Scheduled releases from `today` onward
    pub fn economic_calendar(&self, today: NaiveDate) -> Vec<CalendarEvent> {
        CALENDAR
            .iter()
            .map(|e| CalendarEvent {
                date: today + Duration::days(e.days_ahead),
                time: e.time.to_string(),
                event: e.event.to_string(),
                importance: e.importance,
                forecast: e.forecast.to_string(),
                previous: e.previous.to_string(),
            })
            .collect()
    }
}

fn to_decimal(value: f64, dp: u32) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or_default()
        .round_dp(dp)
}
