//! geopulse CLI
//!
//! Prints economic, market and news views. Sources that fail are replaced by
//! synthetic data, which is marked as such in the output.

use clap::{Parser, Subcommand, ValueEnum};
use geopulse::{
    adapters::SharedTransport,
    aggregator::{Aggregator, EconomyDashboard, MarketSnapshot, NewsFeed},
    client::MockTransport,
    config::Config,
    fallback::FallbackGenerator,
    poller::ViewPoller,
    types::{Category, EconomicIndicatorSet, Indicator, MarketQuote},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "geopulse")]
#[command(about = "Geopolitical and economic data with synthetic fallback")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to geopulse.toml, config.toml, ~/.config/geopulse/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Skip all network calls and serve synthetic data
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Economic indicators, market snapshot and calendar for a country
    Economy {
        /// ISO 3166 alpha-2 code
        #[arg(short, long, default_value = "US")]
        country: String,
    },
    /// Indices, commodities, exchange rates and sentiment
    Markets,
    /// Quote for a single symbol
    Quote { symbol: String },
    /// News for a category
    News {
        #[arg(short, long, default_value = "general")]
        category: Category,
    },
    /// Search news
    Search { query: Vec<String> },
    /// Exchange rates for a base currency
    Rates {
        #[arg(short, long, default_value = "USD")]
        base: String,
    },
    /// Country profile
    Country { name: Vec<String> },
    /// Refresh a view on an interval
    Watch {
        #[arg(short, long, value_enum, default_value = "markets")]
        view: WatchView,
        /// Seconds between refreshes (defaults to the configured interval)
        #[arg(short, long)]
        interval_secs: Option<u64>,
        /// Stop after this many refreshes
        #[arg(short, long)]
        ticks: Option<u64>,
        #[arg(short, long, default_value = "general")]
        category: Category,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum WatchView {
    Markets,
    News,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    let aggregator = if cli.offline {
        tracing::warn!("Offline mode - every view is synthetic");
        let transport: SharedTransport = Arc::new(MockTransport::new());
        Aggregator::new(&config, transport, FallbackGenerator::new(config.fallback.seed))
    } else {
        Aggregator::from_config(&config)?
    };

    let json = cli.json;
    match cli.command {
        Commands::Economy { country } => {
            let dashboard = aggregator.economy_dashboard(&country).await;
            emit(json, &dashboard, print_dashboard)
        }
        Commands::Markets => {
            let snapshot = aggregator.market_snapshot().await;
            emit(json, &snapshot, print_snapshot)
        }
        Commands::Quote { symbol } => {
            let quote = aggregator.quote(&symbol).await;
            emit(json, &quote, |q| print_quotes("Quote", std::slice::from_ref(q)))
        }
        Commands::News { category } => {
            let feed = aggregator.news_feed(category).await;
            emit(json, &feed, print_feed)
        }
        Commands::Search { query } => {
            let feed = aggregator.search_news(&query.join(" ")).await;
            emit(json, &feed, print_feed)
        }
        Commands::Rates { base } => {
            let table = aggregator.exchange_rates(&base).await;
            emit(json, &table, |t| {
                println!("\n💱 Exchange rates, base {} {}\n", t.base, marker(t.is_real_data));
                for (code, rate) in &t.rates {
                    println!("  {:<5} {:>12.4}", code, rate);
                }
            })
        }
        Commands::Country { name } => {
            let info = aggregator.country_profile(&name.join(" ")).await;
            emit(json, &info, |c| {
                println!("\n🌍 {} {}\n", c.name, marker(c.is_real_data));
                println!("Capital:    {}", c.capital.join(", "));
                println!("Region:     {}", c.region);
                println!("Population: {}", c.population);
                println!("Currencies: {}", c.currencies.join(", "));
            })
        }
        Commands::Watch {
            view,
            interval_secs,
            ticks,
            category,
        } => watch(aggregator, &config, view, interval_secs, ticks, category, json).await,
    }
}

async fn watch(
    aggregator: Aggregator,
    config: &Config,
    view: WatchView,
    interval_secs: Option<u64>,
    ticks: Option<u64>,
    category: Category,
    json: bool,
) -> anyhow::Result<()> {
    match view {
        WatchView::Markets => {
            let period = interval_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.polling.markets_interval());
            let mut handle = ViewPoller::spawn("markets", period, move || {
                let aggregator = aggregator.clone();
                async move { aggregator.market_snapshot().await }
            });
            while let Some(snapshot) = handle.changed().await {
                emit(json, snapshot.value.as_ref(), print_snapshot)?;
                if ticks.is_some_and(|t| snapshot.sequence >= t) {
                    break;
                }
            }
            handle.stop().await?;
        }
        WatchView::News => {
            let period = interval_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.polling.news_interval());
            let mut handle = ViewPoller::spawn("news", period, move || {
                let aggregator = aggregator.clone();
                async move { aggregator.news_feed(category).await }
            });
            while let Some(snapshot) = handle.changed().await {
                emit(json, snapshot.value.as_ref(), print_feed)?;
                if ticks.is_some_and(|t| snapshot.sequence >= t) {
                    break;
                }
            }
            handle.stop().await?;
        }
    }
    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, table: impl FnOnce(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        table(value);
    }
    Ok(())
}

fn marker(real: bool) -> &'static str {
    if real {
        "[live]"
    } else {
        "[synthetic]"
    }
}

fn print_indicators(set: &EconomicIndicatorSet) {
    println!(
        "\n📊 {} economic indicators ({}) {}\n",
        set.country_code,
        set.data_year,
        marker(set.is_real_data)
    );
    for indicator in Indicator::ALL {
        println!(
            "  {:<18} {:>22.2} {}",
            format!("{:?}", indicator),
            set.value(indicator),
            if set.is_real(indicator) { "" } else { "*" }
        );
    }
    println!("\n  * fallback value");
}

fn print_quotes(title: &str, quotes: &[MarketQuote]) {
    println!("\n📈 {}\n", title);
    println!(
        "{:<16} {:<22} {:>12} {:>10} {:>9}",
        "Symbol", "Name", "Price", "Change", "Change%"
    );
    println!("{}", "-".repeat(84));
    for q in quotes {
        println!(
            "{:<16} {:<22} {:>12.2} {:>10.2} {:>8.2}% {}",
            q.symbol,
            q.name,
            q.price,
            q.change,
            q.change_percent,
            marker(q.is_real_data)
        );
    }
}

fn print_snapshot(snapshot: &MarketSnapshot) {
    print_quotes("Global indices", &snapshot.indices);
    print_quotes("Commodities", &snapshot.commodities);

    let rates = &snapshot.exchange_rates;
    println!("\n💱 Rates vs {} {}", rates.base, marker(rates.is_real_data));
    for (code, rate) in &rates.rates {
        println!("  {:<5} {:>12.4}", code, rate);
    }

    let s = &snapshot.sentiment;
    println!(
        "\nSentiment: {:?}, fear/greed {}, volatility {:.1} [synthetic]",
        s.overall, s.fear_greed_index, s.volatility_index
    );
}

fn print_dashboard(dashboard: &EconomyDashboard) {
    print_indicators(&dashboard.indicators);
    print_snapshot(&dashboard.markets);

    println!("\n📅 Economic calendar [synthetic]\n");
    for e in &dashboard.calendar {
        println!(
            "  {} {}  {:<32} {:?}  forecast {} / previous {}",
            e.date, e.time, e.event, e.importance, e.forecast, e.previous
        );
    }
}

fn print_feed(feed: &NewsFeed) {
    println!("\n📰 {} articles ({:?})\n", feed.articles.len(), feed.origin);
    for article in &feed.articles {
        println!(
            "[{}] {} {}",
            article.category,
            article.title,
            marker(article.is_real_data())
        );
        println!(
            "    {} · {}",
            article.source_name,
            article.published_at.format("%Y-%m-%d %H:%M")
        );
        if !article.description.is_empty() {
            println!("    {}", article.description);
        }
        if let Some(analysis) = &article.analysis {
            println!(
                "    {:?} sentiment, {:?} impact, risk {:.1}, topics: {}",
                analysis.sentiment,
                analysis.impact,
                analysis.risk_score,
                analysis.key_topics.join(", ")
            );
        }
        if !article.url.is_empty() {
            println!("    {}", article.url);
        }
        println!();
    }
}
