//! View-model records shared by adapters, the aggregator and the CLI

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// World Bank indicator series backing one field of [`EconomicIndicatorSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Gdp,
    GdpGrowth,
    Inflation,
    Unemployment,
    LiteracyRate,
    Population,
    GdpPerCapita,
    TradePercent,
}

impl Indicator {
    pub const ALL: [Indicator; 8] = [
        Indicator::Gdp,
        Indicator::GdpGrowth,
        Indicator::Inflation,
        Indicator::Unemployment,
        Indicator::LiteracyRate,
        Indicator::Population,
        Indicator::GdpPerCapita,
        Indicator::TradePercent,
    ];

    /// World Bank series code
    pub fn code(&self) -> &'static str {
        match self {
            Indicator::Gdp => "NY.GDP.MKTP.CD",
            Indicator::GdpGrowth => "NY.GDP.MKTP.KD.ZG",
            Indicator::Inflation => "FP.CPI.TOTL.ZG",
            Indicator::Unemployment => "SL.UEM.TOTL.ZS",
            Indicator::LiteracyRate => "SE.ADT.LITR.ZS",
            Indicator::Population => "SP.POP.TOTL",
            Indicator::GdpPerCapita => "NY.GDP.PCAP.CD",
            Indicator::TradePercent => "NE.TRD.GNFS.ZS",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Headline economic indicators for one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicIndicatorSet {
    pub country_code: String,
    /// GDP, current USD
    pub gdp: f64,
    /// Annual GDP growth, %
    pub gdp_growth: f64,
    /// Consumer price inflation, %
    pub inflation: f64,
    /// Unemployment, % of labour force
    pub unemployment: f64,
    /// Adult literacy, %
    pub literacy_rate: f64,
    pub population: f64,
    /// GDP per capita, current USD
    pub gdp_per_capita: f64,
    /// Trade, % of GDP
    pub trade_percent: f64,
    pub data_year: i32,
    /// True only when both GDP and GDP growth came from the remote source
    pub is_real_data: bool,
    /// Fields that resolved from the remote source
    pub real_fields: Vec<Indicator>,
}

impl EconomicIndicatorSet {
    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Gdp => self.gdp,
            Indicator::GdpGrowth => self.gdp_growth,
            Indicator::Inflation => self.inflation,
            Indicator::Unemployment => self.unemployment,
            Indicator::LiteracyRate => self.literacy_rate,
            Indicator::Population => self.population,
            Indicator::GdpPerCapita => self.gdp_per_capita,
            Indicator::TradePercent => self.trade_percent,
        }
    }

    pub fn value_mut(&mut self, indicator: Indicator) -> &mut f64 {
        match indicator {
            Indicator::Gdp => &mut self.gdp,
            Indicator::GdpGrowth => &mut self.gdp_growth,
            Indicator::Inflation => &mut self.inflation,
            Indicator::Unemployment => &mut self.unemployment,
            Indicator::LiteracyRate => &mut self.literacy_rate,
            Indicator::Population => &mut self.population,
            Indicator::GdpPerCapita => &mut self.gdp_per_capita,
            Indicator::TradePercent => &mut self.trade_percent,
        }
    }

    pub fn is_real(&self, indicator: Indicator) -> bool {
        self.real_fields.contains(&indicator)
    }
}

/// Index or commodity quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub symbol: String,
    pub name: String,
    pub country: String,
    pub region: String,
    /// Quote unit for commodities (e.g. "USD/barrel")
    pub unit: Option<String>,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub volume: u64,
    pub last_updated: NaiveDate,
    pub is_real_data: bool,
}

/// News category requested by a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Conflicts,
    Economy,
    Diplomacy,
    Technology,
    General,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Conflicts,
        Category::Economy,
        Category::Diplomacy,
        Category::Technology,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Conflicts => "conflicts",
            Category::Economy => "economy",
            Category::Diplomacy => "diplomacy",
            Category::Technology => "technology",
            Category::General => "general",
        }
    }

    /// Every category except general is narrow and may be topped up
    pub fn is_narrow(&self) -> bool {
        !matches!(self, Category::General)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conflicts" | "conflict" | "wars" => Ok(Category::Conflicts),
            "economy" => Ok(Category::Economy),
            "diplomacy" => Ok(Category::Diplomacy),
            "technology" | "tech" => Ok(Category::Technology),
            "general" | "all" | "geopolitics" => Ok(Category::General),
            other => {
                let known: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
                Err(format!(
                    "unknown category: {} (expected one of {})",
                    other,
                    known.join(", ")
                ))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// Annotation attached to an article by the analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleAnalysis {
    pub sentiment: Sentiment,
    pub impact: Impact,
    /// 0.7 - 1.0
    pub confidence: f64,
    pub key_topics: Vec<String>,
    /// 0 - 10
    pub risk_score: f64,
    pub prediction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source_name: String,
    pub category: Category,
    /// Delivered by the Google News RSS source
    pub is_google_news: bool,
    /// Delivered by a live remote call in this refresh
    pub is_fresh: bool,
    pub analysis: Option<ArticleAnalysis>,
}

impl NewsArticle {
    pub fn is_real_data(&self) -> bool {
        self.is_google_news || self.is_fresh
    }
}

/// Exchange rates keyed to one base currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    pub base: String,
    pub rates: BTreeMap<String, Decimal>,
    pub is_real_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketBias {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectorBias {
    Positive,
    Neutral,
    Negative,
}

/// Market mood; never backed by a real source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSentiment {
    pub overall: MarketBias,
    /// 0 - 100
    pub fear_greed_index: u8,
    pub volatility_index: f64,
    pub sectors: BTreeMap<String, SectorBias>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub name: String,
    pub population: u64,
    pub capital: Vec<String>,
    pub region: String,
    pub currencies: Vec<String>,
    pub is_real_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub time: String,
    pub event: String,
    pub importance: Impact,
    pub forecast: String,
    pub previous: String,
}

/// Tracked index or commodity
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub symbol: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub country: Cow<'static, str>,
    pub region: Cow<'static, str>,
    pub unit: Option<Cow<'static, str>>,
    /// Anchor for synthetic quotes
    pub base_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_parse_back() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
            assert_eq!(category.to_string().to_uppercase().parse::<Category>(), Ok(category));
        }
        assert_eq!(" Tech ".parse::<Category>(), Ok(Category::Technology));
    }

    #[test]
    fn test_unknown_category_lists_choices() {
        let err = "sports".parse::<Category>().unwrap_err();
        assert!(err.contains("sports"));
        assert!(err.contains("conflicts, economy, diplomacy, technology, general"));
    }
}
