//! geopulse
//!
//! Geopolitical and economic data aggregation. Every view is assembled from
//! public sources (World Bank, Alpha Vantage, Google News, NewsAPI,
//! exchange-rate and country APIs) and degrades to clearly flagged synthetic
//! data when a source fails.

pub mod adapters;
pub mod aggregator;
pub mod analysis;
pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod normalize;
pub mod poller;
pub mod resilient;
pub mod testing;
pub mod types;
