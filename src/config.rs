//! Configuration management

use crate::error::GeoError;
use crate::normalize::ELLIPSIS;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: EndpointConfig,
    pub keys: ApiKeys,
    pub news: NewsConfig,
    pub markets: MarketConfig,
    pub http: HttpConfig,
    pub polling: PollingConfig,
    pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// World Bank indicators API
    pub world_bank_url: String,
    /// REST Countries API
    pub rest_countries_url: String,
    /// Exchange rate API (`{url}/{base}` returns the rate table)
    pub exchange_rates_url: String,
    /// Alpha Vantage query endpoint
    pub alpha_vantage_url: String,
    /// NewsAPI v2
    pub news_api_url: String,
    /// Google News host serving the RSS feeds
    pub google_news_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    /// NewsAPI key; `None` disables the NewsAPI fallback
    pub news_api: Option<String>,
    /// Alpha Vantage key ("demo" works with heavy quota limits)
    pub alpha_vantage: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Narrow-category feeds below this count are topped up from the general feed
    pub top_up_threshold: usize,
    /// Maximum articles taken from one feed (and total after top-up)
    pub max_items: usize,
    /// Description length bound, before the trailing ellipsis
    pub description_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Number of tracked indices quoted per snapshot
    pub index_count: usize,
    /// Number of tracked commodities quoted per snapshot
    pub commodity_count: usize,
    /// Base currency for the exchange rate table
    pub base_currency: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Market snapshot refresh interval in seconds
    pub markets_interval_secs: u64,
    /// News feed refresh interval in seconds
    pub news_interval_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Fixed seed for synthetic data; random when unset
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from file, overlaid with `GEOPULSE__*` environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path
            .as_ref()
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Config path is not valid UTF-8"))?;

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("GEOPULSE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Load from default locations, or defaults when no file exists
    pub fn load_default() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let paths = ["geopulse.toml", "config.toml", "~/.config/geopulse/config.toml"];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Self::load("geopulse.toml")
    }
}

impl Config {
    /// Reject settings that would make every view degenerate
    pub fn validate(&self) -> crate::error::Result<()> {
        let endpoints = [
            ("world_bank_url", &self.endpoints.world_bank_url),
            ("rest_countries_url", &self.endpoints.rest_countries_url),
            ("exchange_rates_url", &self.endpoints.exchange_rates_url),
            ("alpha_vantage_url", &self.endpoints.alpha_vantage_url),
            ("news_api_url", &self.endpoints.news_api_url),
            ("google_news_url", &self.endpoints.google_news_url),
        ];
        if let Some((name, _)) = endpoints.iter().find(|(_, url)| url.trim().is_empty()) {
            return Err(GeoError::Config(format!("endpoints.{} is empty", name)));
        }
        if self.news.max_items == 0 {
            return Err(GeoError::Config("news.max_items must be positive".to_string()));
        }
        if self.news.description_limit < ELLIPSIS.len() {
            return Err(GeoError::Config(format!(
                "news.description_limit must be at least {}",
                ELLIPSIS.len()
            )));
        }
        if self.news.top_up_threshold > self.news.max_items {
            return Err(GeoError::Config(format!(
                "news.top_up_threshold ({}) exceeds news.max_items ({})",
                self.news.top_up_threshold, self.news.max_items
            )));
        }
        Ok(())
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PollingConfig {
    pub fn markets_interval(&self) -> Duration {
        Duration::from_secs(self.markets_interval_secs)
    }

    pub fn news_interval(&self) -> Duration {
        Duration::from_secs(self.news_interval_secs)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            world_bank_url: "https://api.worldbank.org/v2".to_string(),
            rest_countries_url: "https://restcountries.com/v3.1".to_string(),
            exchange_rates_url: "https://api.exchangerate-api.com/v4/latest".to_string(),
            alpha_vantage_url: "https://www.alphavantage.co/query".to_string(),
            news_api_url: "https://newsapi.org/v2".to_string(),
            google_news_url: "https://news.google.com".to_string(),
        }
    }
}

impl Default for ApiKeys {
    fn default() -> Self {
        Self {
            news_api: None,
            alpha_vantage: "demo".to_string(),
        }
    }
}

impl ApiKeys {
    /// NewsAPI key if one is actually configured (placeholders count as absent)
    pub fn news_api_key(&self) -> Option<&str> {
        self.news_api
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != "demo_key" && *k != "your_news_api_key_here")
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            top_up_threshold: 5,
            max_items: 10,
            description_limit: 200,
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            index_count: 8,
            commodity_count: 6,
            base_currency: "USD".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: concat!("geopulse/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            markets_interval_secs: 30,
            news_interval_secs: 300,
        }
    }
}
