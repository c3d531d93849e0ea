//! Upstream payload builders
//!
//! Bodies mirror what each public API actually returns, trimmed to the
//! fields the normalizers read.

use crate::client::{MockReply, MockTransport};
use crate::fallback::tables::{COMMODITIES, GLOBAL_INDICES};
use serde_json::json;

/// World Bank indicator page: `[meta, observations]`, newest year first
pub fn world_bank_page(series: &str, observations: &[(i32, Option<f64>)]) -> String {
    let rows: Vec<_> = observations
        .iter()
        .map(|(year, value)| {
            json!({
                "indicator": { "id": series, "value": series },
                "country": { "id": "US", "value": "United States" },
                "date": year.to_string(),
                "value": value,
                "unit": "",
                "decimal": 1
            })
        })
        .collect();

    json!([
        { "page": 1, "pages": 1, "per_page": 10, "total": rows.len() },
        rows
    ])
    .to_string()
}

/// World Bank error envelope for a bad country or series
pub fn world_bank_error() -> String {
    json!([{ "message": [{ "id": "120", "key": "Invalid value",
        "value": "The provided parameter value is not valid" }] }])
    .to_string()
}

/// Alpha Vantage `GLOBAL_QUOTE` body
pub fn global_quote(symbol: &str, price: &str, change: &str, percent: &str) -> String {
    json!({
        "Global Quote": {
            "01. symbol": symbol,
            "05. price": price,
            "06. volume": "3125000",
            "07. latest trading day": "2025-01-06",
            "09. change": change,
            "10. change percent": format!("{}%", percent)
        }
    })
    .to_string()
}

/// Alpha Vantage throttling notice
pub fn rate_limit_note() -> String {
    json!({
        "Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."
    })
    .to_string()
}

/// Google News style RSS feed with `count` items about `topic`
pub fn rss_feed(count: usize, topic: &str) -> String {
    let items: String = (0..count)
        .map(|i| {
            format!(
                r##"<item>
<title>{topic} headline {i} - Reuters</title>
<link>https://news.example.com/{topic}/{i}</link>
<guid isPermaLink="false">{topic}-{i}</guid>
<pubDate>Mon, 06 Jan 2025 10:30:00 GMT</pubDate>
<description>&lt;a href="https://news.example.com/{topic}/{i}"&gt;{topic} story {i}&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Reuters&lt;/font&gt;</description>
<source url="https://www.reuters.com">Reuters</source>
</item>"##
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><rss version="2.0"><channel><title>"{topic}" - Google News</title><link>https://news.google.com</link>{items}</channel></rss>"#
    )
}

/// NewsAPI envelope with one article per title
pub fn news_api_body(titles: &[&str]) -> String {
    let articles: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "source": { "id": null, "name": "The Guardian" },
                "author": null,
                "title": title,
                "description": format!("Coverage of {}", title),
                "url": format!("https://newsapi.example.com/{}", i),
                "urlToImage": format!("https://newsapi.example.com/{}.jpg", i),
                "publishedAt": "2025-01-06T09:00:00Z",
                "content": null
            })
        })
        .collect();

    json!({
        "status": "ok",
        "totalResults": articles.len(),
        "articles": articles
    })
    .to_string()
}

/// exchangerate-api style body
pub fn rates_body(base: &str, rates: &[(&str, f64)]) -> String {
    let rates: serde_json::Map<_, _> = rates
        .iter()
        .map(|(code, rate)| (code.to_string(), json!(rate)))
        .collect();
    json!({
        "base": base,
        "date": "2025-01-06",
        "time_last_updated": 1736121601,
        "rates": rates
    })
    .to_string()
}

/// REST Countries name search with one match
pub fn country_body(name: &str, population: u64, capital: &str, currency: &str) -> String {
    json!([{
        "name": { "common": name, "official": name },
        "population": population,
        "capital": [capital],
        "region": "Europe",
        "currencies": { currency: { "name": currency, "symbol": "" } }
    }])
    .to_string()
}

/// Transport that answers every source with a well-formed payload.
/// Each tracked instrument gets a quote carrying its own symbol.
pub fn healthy_transport() -> MockTransport {
    let transport = MockTransport::new()
        .route(
            "NY.GDP.MKTP.CD",
            MockReply::Body(world_bank_page(
                "NY.GDP.MKTP.CD",
                &[(2023, Some(27_360_935_000_000.0))],
            )),
        )
        .route(
            "NY.GDP.MKTP.KD.ZG",
            MockReply::Body(world_bank_page("NY.GDP.MKTP.KD.ZG", &[(2023, Some(2.5))])),
        )
        .route(
            "indicator/",
            MockReply::Body(world_bank_page("other", &[(2023, Some(4.1))])),
        );

    GLOBAL_INDICES
        .iter()
        .chain(COMMODITIES)
        .fold(transport, |transport, instrument| {
            let price = format!("{:.2}", instrument.base_price);
            transport.route(
                &format!("symbol={}&", instrument.symbol),
                MockReply::Body(global_quote(&instrument.symbol, &price, "12.50", "0.2622")),
            )
        })
        .route("rss/", MockReply::Body(rss_feed(8, "geopolitics")))
        .route(
            "newsapi",
            MockReply::Body(news_api_body(&["Summit opens", "Markets steady"])),
        )
        .route(
            "latest/",
            MockReply::Body(rates_body("USD", &[("EUR", 0.92), ("JPY", 151.2)])),
        )
        .route(
            "/name/",
            MockReply::Body(country_body("France", 67_391_582, "Paris", "EUR")),
        )
}
