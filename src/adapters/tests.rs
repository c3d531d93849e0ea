//! Tests for source adapters

#[cfg(test)]
mod tests {
    use crate::adapters::{Adapters, SharedTransport};
    use crate::client::{MockHttpTransport, MockReply, MockTransport};
    use crate::config::Config;
    use crate::error::GeoError;
    use crate::fallback::tables::{self, COMMODITIES, GLOBAL_INDICES};
    use crate::fallback::FallbackGenerator;
    use crate::resilient::{DataSource, Origin};
    use crate::testing::fixtures;
    use crate::types::{Category, Indicator};
    use chrono::{Datelike, Utc};
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn adapters_with(config: &Config, transport: &MockTransport) -> Adapters {
        let shared: SharedTransport = Arc::new(transport.clone());
        Adapters::new(config, shared, FallbackGenerator::seeded(5))
    }

    fn adapters(transport: &MockTransport) -> Adapters {
        adapters_with(&Config::default(), transport)
    }

    fn keyed_config() -> Config {
        let mut config = Config::default();
        config.keys.news_api = Some("live-key".to_string());
        config
    }

    fn keys(value: &impl serde::Serialize) -> BTreeSet<String> {
        serde_json::to_value(value)
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    // ==================== Economic ====================

    #[tokio::test]
    async fn test_economic_all_series_down_returns_table() {
        let transport = MockTransport::new();
        let set = adapters(&transport).economic.indicators("US").await;

        assert_eq!(set.gdp, 25_462_700_000_000.0);
        assert_eq!(set.gdp_growth, 2.1);
        assert!(!set.is_real_data);
        assert!(set.real_fields.is_empty());
        assert_eq!(set.data_year, Utc::now().year() - 1);
        assert_eq!(transport.call_count("api.worldbank.org"), 8);
    }

    #[tokio::test]
    async fn test_economic_gdp_and_growth_live_others_failed() {
        let transport = MockTransport::new()
            .route(
                "NY.GDP.MKTP.CD",
                MockReply::Body(fixtures::world_bank_page(
                    "NY.GDP.MKTP.CD",
                    &[(2023, Some(27_360_935_000_000.0)), (2022, Some(25_744_100_000_000.0))],
                )),
            )
            .route(
                "NY.GDP.MKTP.KD.ZG",
                MockReply::Body(fixtures::world_bank_page(
                    "NY.GDP.MKTP.KD.ZG",
                    &[(2024, None), (2023, Some(2.5))],
                )),
            )
            .route("FP.CPI.TOTL.ZG", MockReply::Status(500));

        let set = adapters(&transport).economic.indicators("us").await;
        let table = FallbackGenerator::seeded(1).economic_indicators("US");

        assert!(set.is_real_data);
        assert_eq!(set.country_code, "US");
        assert_eq!(set.gdp, 27_360_935_000_000.0);
        assert_eq!(set.gdp_growth, 2.5);
        assert_eq!(set.data_year, 2023);
        assert_eq!(set.inflation, table.inflation);
        assert_eq!(set.unemployment, table.unemployment);
        assert_eq!(set.trade_percent, 50.0);
        assert_eq!(set.real_fields, vec![Indicator::Gdp, Indicator::GdpGrowth]);
    }

    #[tokio::test]
    async fn test_economic_request_window() {
        let transport = MockTransport::new();
        adapters(&transport).economic.indicators("DE").await;

        let year = Utc::now().year();
        let window = format!("date={}:{}", year - 5, year);
        let calls = transport.calls();
        assert_eq!(calls.len(), Indicator::ALL.len());
        for indicator in Indicator::ALL {
            let call = calls
                .iter()
                .find(|c| c.contains(&format!("/country/DE/indicator/{}?", indicator.code())))
                .expect("series requested");
            assert!(call.contains("format=json"));
            assert!(call.contains(&window));
            assert!(call.contains("per_page=10"));
        }
    }

    #[tokio::test]
    async fn test_economic_unknown_country_gets_us_values() {
        let transport =
            MockTransport::new().route("worldbank", MockReply::Body(fixtures::world_bank_error()));
        let set = adapters(&transport).economic.indicators("ZZ").await;
        let us = FallbackGenerator::seeded(1).economic_indicators("US");

        assert_eq!(set.country_code, "ZZ");
        assert_eq!(set.gdp, us.gdp);
        assert_eq!(set.population, us.population);
        assert!(!set.is_real_data);
    }

    #[tokio::test]
    async fn test_economic_empty_window_falls_back_per_field() {
        let transport = MockTransport::new()
            .route(
                "SP.POP.TOTL",
                MockReply::Body(fixtures::world_bank_page(
                    "SP.POP.TOTL",
                    &[(2023, Some(334_914_895.0))],
                )),
            )
            .route("worldbank", MockReply::Body(r#"[{"page":1,"total":0},null]"#.to_string()));

        let set = adapters(&transport).economic.indicators("US").await;
        assert_eq!(set.population, 334_914_895.0);
        assert!(set.is_real(Indicator::Population));
        assert!(!set.is_real_data);
        assert_eq!(set.gdp, 25_462_700_000_000.0);
    }

    // ==================== Markets ====================

    #[tokio::test]
    async fn test_quote_live() {
        let transport = MockTransport::new().route(
            "symbol=SPX",
            MockReply::Body(fixtures::global_quote("SPX", "4780.94", "12.50", "0.2622")),
        );
        let sourced = adapters(&transport).markets.quote(&GLOBAL_INDICES[0]).await;

        assert_eq!(sourced.origin, Origin::Live(DataSource::AlphaVantage));
        let quote = sourced.value;
        assert!(quote.is_real_data);
        assert_eq!(quote.price, dec!(4780.94));
        assert_eq!(quote.name, "S&P 500");

        let call = &transport.calls()[0];
        assert!(call.contains("function=GLOBAL_QUOTE"));
        assert!(call.contains("apikey=demo"));
    }

    #[tokio::test]
    async fn test_quote_rate_limited_falls_back_in_band() {
        let transport = MockTransport::new()
            .route("GLOBAL_QUOTE", MockReply::Body(fixtures::rate_limit_note()));
        let wti = &COMMODITIES[0];
        let sourced = adapters(&transport).markets.quote(wti).await;

        assert_eq!(sourced.origin, Origin::Synthetic);
        let price = sourced.value.price.to_f64().unwrap();
        assert!((67.5..=82.5).contains(&price));
        assert!(!sourced.value.is_real_data);
        assert_eq!(sourced.value.unit.as_deref(), Some("USD/barrel"));
    }

    #[tokio::test]
    async fn test_quote_zero_price_rejected() {
        let transport = MockTransport::new().route(
            "GLOBAL_QUOTE",
            MockReply::Body(fixtures::global_quote("GOLD", "0.0000", "0", "0")),
        );
        let sourced = adapters(&transport)
            .markets
            .quote(&tables::instrument("GOLD"))
            .await;
        assert!(!sourced.is_real());
    }

    #[tokio::test]
    async fn test_indices_keep_table_order() {
        let transport = MockTransport::new();
        let quotes = adapters(&transport).markets.indices(8).await;

        let symbols: Vec<_> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        let expected: Vec<_> = GLOBAL_INDICES[..8]
            .iter()
            .map(|i| i.symbol.as_ref())
            .collect();
        assert_eq!(symbols, expected);
        assert!(quotes.iter().all(|q| !q.is_real_data));
    }

    #[tokio::test]
    async fn test_commodity_count_clamped() {
        let transport = MockTransport::new();
        let quotes = adapters(&transport).markets.commodities(50).await;
        assert_eq!(quotes.len(), COMMODITIES.len());
    }

    #[tokio::test]
    async fn test_live_and_fallback_quotes_share_shape() {
        let live = MockTransport::new().route(
            "GLOBAL_QUOTE",
            MockReply::Body(fixtures::global_quote("SPX", "4780.94", "12.50", "0.2622")),
        );
        let dead = MockTransport::new();

        let a = adapters(&live)
            .markets
            .quote(&GLOBAL_INDICES[0])
            .await
            .value;
        let b = adapters(&dead)
            .markets
            .quote(&GLOBAL_INDICES[0])
            .await
            .value;
        assert_eq!(keys(&a), keys(&b));
        assert_eq!(a.symbol, b.symbol);
    }

    #[tokio::test]
    async fn test_quote_with_mocked_transport_error() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get().times(1).returning(|request| {
            Err(GeoError::Status {
                status: 503,
                url: request.url.clone(),
            })
        });

        let shared: SharedTransport = Arc::new(mock);
        let adapters = Adapters::new(&Config::default(), shared, FallbackGenerator::seeded(2));
        let quote = adapters.markets.quote(&GLOBAL_INDICES[3]).await;

        assert_eq!(quote.origin, Origin::Synthetic);
        assert_eq!(quote.value.symbol, "FTSE");
    }

    // ==================== News ====================

    #[tokio::test]
    async fn test_short_narrow_feed_topped_up_from_general() {
        let transport = MockTransport::new()
            .route("q=conflict war", MockReply::Body(fixtures::rss_feed(3, "conflict")))
            .route("q=geopolitics", MockReply::Body(fixtures::rss_feed(8, "geopolitics")));

        let sourced = adapters(&transport)
            .news
            .category(Category::Conflicts)
            .await;
        let articles = &sourced.value;

        assert_eq!(sourced.origin, Origin::Live(DataSource::GoogleNews));
        assert!(articles.len() >= 5);
        assert!(articles.len() <= 10);
        assert_eq!(articles[0].category, Category::Conflicts);
        assert!(articles.iter().all(|a| a.is_google_news && a.is_fresh));

        let ids: BTreeSet<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), articles.len());
    }

    #[tokio::test]
    async fn test_full_feed_not_topped_up() {
        let transport = MockTransport::new()
            .route("q=global economy", MockReply::Body(fixtures::rss_feed(6, "economy")));

        let articles = adapters(&transport)
            .news
            .category(Category::Economy)
            .await
            .value;
        assert_eq!(articles.len(), 6);
        assert_eq!(transport.call_count("q=geopolitics"), 0);
    }

    #[tokio::test]
    async fn test_general_feed_never_topped_up() {
        let transport = MockTransport::new()
            .route("q=geopolitics", MockReply::Body(fixtures::rss_feed(2, "general")));

        let articles = adapters(&transport)
            .news
            .category(Category::General)
            .await
            .value;
        assert_eq!(articles.len(), 2);
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_news_unkeyed_falls_back_to_synthetic() {
        let transport = MockTransport::new().route("rss/", MockReply::Status(503));

        let sourced = adapters(&transport)
            .news
            .category(Category::Diplomacy)
            .await;
        assert_eq!(sourced.origin, Origin::Synthetic);
        assert_eq!(sourced.value.len(), 8);
        assert!(sourced
            .value
            .iter()
            .all(|a| !a.is_google_news && !a.is_fresh));
        assert_eq!(transport.call_count("newsapi"), 0);
    }

    #[tokio::test]
    async fn test_news_keyed_uses_news_api() {
        let transport = MockTransport::new()
            .route("rss/", MockReply::Unreachable)
            .route(
                "top-headlines",
                MockReply::Body(fixtures::news_api_body(&[
                    "Summit opens",
                    "[Removed]",
                    "Markets steady",
                ])),
            );

        let sourced = adapters_with(&keyed_config(), &transport)
            .news
            .category(Category::Technology)
            .await;

        assert_eq!(sourced.origin, Origin::Live(DataSource::NewsApi));
        assert_eq!(sourced.value.len(), 2);
        assert!(sourced
            .value
            .iter()
            .all(|a| !a.is_google_news && a.is_fresh));

        let call = transport
            .calls()
            .into_iter()
            .find(|c| c.contains("top-headlines"))
            .unwrap();
        assert!(call.contains("apiKey=live-key"));
        assert!(call.contains("pageSize=20"));
    }

    #[tokio::test]
    async fn test_news_api_error_status_falls_back() {
        let transport = MockTransport::new().route(
            "top-headlines",
            MockReply::json(json!({
                "status": "error",
                "code": "apiKeyInvalid",
                "message": "bad key"
            })),
        );

        let sourced = adapters_with(&keyed_config(), &transport)
            .news
            .category(Category::Economy)
            .await;
        assert_eq!(sourced.origin, Origin::Synthetic);
    }

    #[tokio::test]
    async fn test_repeated_feed_reads_stay_well_formed() {
        let transport = fixtures::healthy_transport();
        let adapters = adapters(&transport);

        for _ in 0..3 {
            let articles = adapters.news.category(Category::General).await.value;
            assert!(!articles.is_empty());
            for article in &articles {
                assert!(!article.description.contains('<'));
                assert!(article.description.chars().count() <= 200);
                assert!(!article.title.ends_with(" - Reuters"));
            }
        }
    }

    #[tokio::test]
    async fn test_live_and_synthetic_articles_share_shape() {
        let live = adapters(&fixtures::healthy_transport())
            .news
            .category(Category::General)
            .await
            .value;
        let synthetic = adapters(&MockTransport::new())
            .news
            .category(Category::General)
            .await
            .value;
        assert_eq!(keys(&live[0]), keys(&synthetic[0]));
    }

    #[tokio::test]
    async fn test_search_live_results_are_classified() {
        let transport = MockTransport::new().route(
            "q=sanctions",
            MockReply::Body(fixtures::rss_feed(2, "trade")),
        );

        let sourced = adapters(&transport).news.search("sanctions").await;
        assert!(sourced.is_real());
        assert!(sourced
            .value
            .iter()
            .all(|a| a.category == Category::Economy));
        assert!(sourced.value[0].id.contains("-search-"));
    }

    #[tokio::test]
    async fn test_search_falls_back_to_filtered_headlines() {
        let transport = MockTransport::new();
        let sourced = adapters(&transport).news.search("Cyber").await;

        assert_eq!(sourced.origin, Origin::Synthetic);
        assert_eq!(sourced.value.len(), 1);
        assert_eq!(sourced.value[0].category, Category::Technology);
    }

    #[tokio::test]
    async fn test_search_keyed_everything_endpoint() {
        let transport = MockTransport::new().route(
            "everything",
            MockReply::Body(fixtures::news_api_body(&["Cyber attack on grid"])),
        );

        let sourced = adapters_with(&keyed_config(), &transport)
            .news
            .search("grid")
            .await;
        assert_eq!(sourced.origin, Origin::Live(DataSource::NewsApi));
        assert_eq!(sourced.value[0].category, Category::Technology);

        let call = transport
            .calls()
            .into_iter()
            .find(|c| c.contains("everything"))
            .unwrap();
        assert!(call.contains("sortBy=publishedAt"));
        assert!(call.contains("q=grid"));
    }

    // ==================== Rates & countries ====================

    #[tokio::test]
    async fn test_rates_live() {
        let transport = MockTransport::new().route(
            "latest/EUR",
            MockReply::Body(fixtures::rates_body("EUR", &[("USD", 1.09), ("GBP", 0.86)])),
        );
        let sourced = adapters(&transport).rates.rates("eur").await;

        assert!(sourced.is_real());
        assert_eq!(sourced.value.base, "EUR");
        assert_eq!(sourced.value.rates["GBP"], dec!(0.86));
        assert!(sourced.value.is_real_data);
    }

    #[tokio::test]
    async fn test_empty_rates_fall_back() {
        let transport = MockTransport::new()
            .route("latest/", MockReply::Body(fixtures::rates_body("USD", &[])));
        let table = adapters(&transport).rates.rates("USD").await.value;

        assert!(!table.is_real_data);
        assert_eq!(table.rates.len(), 8);
        assert_eq!(table.rates["JPY"], dec!(110.0));
    }

    #[tokio::test]
    async fn test_country_live_and_fallback() {
        let transport = MockTransport::new()
            .route(
                "/name/france",
                MockReply::Body(fixtures::country_body("France", 67_391_582, "Paris", "EUR")),
            )
            .route("/name/", MockReply::Status(404));
        let adapters = adapters(&transport);

        let france = adapters.countries.country("france").await.value;
        assert!(france.is_real_data);
        assert_eq!(france.capital, vec!["Paris".to_string()]);

        let missing = adapters.countries.country("atlantis").await.value;
        assert!(!missing.is_real_data);
        assert_eq!(missing.name, "United States");
    }
}
