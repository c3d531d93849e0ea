//! Fixed tables behind synthetic data and the tracked instrument lists

use crate::types::{Category, Impact, Instrument};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Per-country indicator baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomicBaseline {
    pub gdp: f64,
    pub gdp_growth: f64,
    pub inflation: f64,
    pub unemployment: f64,
    pub literacy_rate: f64,
    pub population: f64,
    pub gdp_per_capita: f64,
    pub trade_percent: f64,
}

/// Trade share used when no baseline carries one
pub const DEFAULT_TRADE_PERCENT: f64 = 50.0;

pub const DEFAULT_COUNTRY: &str = "US";

pub const ECONOMIC_BASELINES: &[(&str, EconomicBaseline)] = &[
    (
        "US",
        EconomicBaseline {
            gdp: 25_462_700_000_000.0,
            gdp_growth: 2.1,
            inflation: 3.2,
            unemployment: 3.7,
            literacy_rate: 99.0,
            population: 331_900_000.0,
            gdp_per_capita: 76_398.0,
            trade_percent: DEFAULT_TRADE_PERCENT,
        },
    ),
    (
        "CN",
        EconomicBaseline {
            gdp: 17_734_000_000_000.0,
            gdp_growth: 5.2,
            inflation: 2.1,
            unemployment: 5.2,
            literacy_rate: 96.8,
            population: 1_412_000_000.0,
            gdp_per_capita: 12_556.0,
            trade_percent: DEFAULT_TRADE_PERCENT,
        },
    ),
    (
        "DE",
        EconomicBaseline {
            gdp: 4_259_000_000_000.0,
            gdp_growth: 1.1,
            inflation: 2.4,
            unemployment: 3.1,
            literacy_rate: 99.0,
            population: 83_200_000.0,
            gdp_per_capita: 51_203.0,
            trade_percent: DEFAULT_TRADE_PERCENT,
        },
    ),
    (
        "JP",
        EconomicBaseline {
            gdp: 4_940_000_000_000.0,
            gdp_growth: 1.0,
            inflation: 1.8,
            unemployment: 2.6,
            literacy_rate: 99.0,
            population: 125_800_000.0,
            gdp_per_capita: 39_285.0,
            trade_percent: DEFAULT_TRADE_PERCENT,
        },
    ),
    (
        "GB",
        EconomicBaseline {
            gdp: 3_131_000_000_000.0,
            gdp_growth: 1.3,
            inflation: 2.9,
            unemployment: 3.8,
            literacy_rate: 99.0,
            population: 67_500_000.0,
            gdp_per_capita: 46_410.0,
            trade_percent: DEFAULT_TRADE_PERCENT,
        },
    ),
];

/// Baseline for `country`, the US baseline for anything unknown
pub fn economic_baseline(country: &str) -> EconomicBaseline {
    let lookup = |code: &str| {
        ECONOMIC_BASELINES
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|(_, b)| *b)
    };
    lookup(country)
        .or_else(|| lookup(DEFAULT_COUNTRY))
        .unwrap_or(ECONOMIC_BASELINES[0].1)
}

const fn index(
    symbol: &'static str,
    name: &'static str,
    country: &'static str,
    region: &'static str,
    base_price: f64,
) -> Instrument {
    Instrument {
        symbol: Cow::Borrowed(symbol),
        name: Cow::Borrowed(name),
        country: Cow::Borrowed(country),
        region: Cow::Borrowed(region),
        unit: None,
        base_price,
    }
}

const fn commodity(
    symbol: &'static str,
    name: &'static str,
    unit: &'static str,
    base_price: f64,
) -> Instrument {
    Instrument {
        symbol: Cow::Borrowed(symbol),
        name: Cow::Borrowed(name),
        country: Cow::Borrowed("Global"),
        region: Cow::Borrowed("Commodities"),
        unit: Some(Cow::Borrowed(unit)),
        base_price,
    }
}

pub const GLOBAL_INDICES: &[Instrument] = &[
    index("SPX", "S&P 500", "US", "North America", 4_500.0),
    index("DJI", "Dow Jones", "US", "North America", 35_000.0),
    index("IXIC", "NASDAQ", "US", "North America", 14_000.0),
    index("FTSE", "FTSE 100", "UK", "Europe", 7_500.0),
    index("GDAXI", "DAX", "Germany", "Europe", 15_800.0),
    index("FCHI", "CAC 40", "France", "Europe", 7_300.0),
    index("N225", "Nikkei 225", "Japan", "Asia", 32_000.0),
    index("HSI", "Hang Seng", "Hong Kong", "Asia", 17_500.0),
    index("SSEC", "Shanghai Composite", "China", "Asia", 3_100.0),
    index("SENSEX", "BSE Sensex", "India", "Asia", 65_000.0),
    index("BVSP", "Bovespa", "Brazil", "South America", 118_000.0),
    index("TSX", "TSX Composite", "Canada", "North America", 20_000.0),
];

pub const COMMODITIES: &[Instrument] = &[
    commodity("CRUDE_OIL_WTI", "Crude Oil (WTI)", "USD/barrel", 75.0),
    commodity("BRENT", "Brent Oil", "USD/barrel", 78.0),
    commodity("NATURAL_GAS", "Natural Gas", "USD/MMBtu", 3.2),
    commodity("GOLD", "Gold", "USD/oz", 2_000.0),
    commodity("SILVER", "Silver", "USD/oz", 25.0),
    commodity("COPPER", "Copper", "USD/lb", 4.2),
    commodity("WHEAT", "Wheat", "USD/bushel", 6.5),
    commodity("CORN", "Corn", "USD/bushel", 5.8),
];

/// Anchor for instruments missing from both tables
pub const DEFAULT_BASE_PRICE: f64 = 100.0;

/// Tracked instrument for `symbol`, or an untracked one anchored at
/// [`DEFAULT_BASE_PRICE`]
pub fn instrument(symbol: &str) -> Instrument {
    let symbol = symbol.trim().to_uppercase();
    GLOBAL_INDICES
        .iter()
        .chain(COMMODITIES)
        .find(|i| i.symbol == symbol.as_str())
        .cloned()
        .unwrap_or_else(|| Instrument {
            name: Cow::Owned(symbol.clone()),
            symbol: Cow::Owned(symbol),
            country: Cow::Borrowed("Unknown"),
            region: Cow::Borrowed("Unknown"),
            unit: None,
            base_price: DEFAULT_BASE_PRICE,
        })
}

pub fn fallback_rates() -> BTreeMap<String, Decimal> {
    [
        ("EUR", dec!(0.85)),
        ("GBP", dec!(0.73)),
        ("JPY", dec!(110.0)),
        ("CNY", dec!(6.45)),
        ("CAD", dec!(1.35)),
        ("AUD", dec!(1.52)),
        ("CHF", dec!(0.92)),
        ("SEK", dec!(10.8)),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
}

pub struct Headline {
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
}

pub const HEADLINES: &[Headline] = &[
    Headline {
        title: "Global Economic Summit Addresses Rising Trade Tensions",
        description: "World leaders convene to discuss escalating trade disputes and their impact on global supply chains, with focus on semiconductor and energy sectors.",
        category: Category::Economy,
    },
    Headline {
        title: "NATO Allies Strengthen Eastern European Defense Posture",
        description: "Alliance members announce enhanced military cooperation and infrastructure investments in response to evolving security challenges.",
        category: Category::Conflicts,
    },
    Headline {
        title: "Diplomatic Breakthrough in Middle East Peace Negotiations",
        description: "Regional powers make significant progress in multilateral talks, raising hopes for sustainable conflict resolution.",
        category: Category::Diplomacy,
    },
    Headline {
        title: "Cyber Security Threats Escalate Amid Geopolitical Tensions",
        description: "Government agencies report increased cyber attacks targeting critical infrastructure and financial systems.",
        category: Category::Technology,
    },
    Headline {
        title: "Arctic Council Meeting Addresses Climate and Security Issues",
        description: "Member nations discuss territorial claims and environmental protection as ice melting opens new shipping routes.",
        category: Category::General,
    },
    Headline {
        title: "International Energy Markets Show Volatility",
        description: "Oil and gas prices fluctuate as geopolitical events impact global energy supply chains and strategic reserves.",
        category: Category::Economy,
    },
    Headline {
        title: "UN Security Council Debates Humanitarian Crisis Response",
        description: "Council members seek consensus on international intervention and aid distribution in conflict-affected regions.",
        category: Category::Diplomacy,
    },
    Headline {
        title: "Space Technology Competition Intensifies Between Major Powers",
        description: "Nations accelerate satellite and space exploration programs amid concerns over military applications.",
        category: Category::Technology,
    },
];

pub const NEWS_SOURCES: &[&str] = &[
    "Reuters",
    "Associated Press",
    "Financial Times",
    "Bloomberg",
    "BBC News",
];

pub struct ScheduledEvent {
    pub days_ahead: i64,
    pub time: &'static str,
    pub event: &'static str,
    pub importance: Impact,
    pub forecast: &'static str,
    pub previous: &'static str,
}

pub const CALENDAR: &[ScheduledEvent] = &[
    ScheduledEvent {
        days_ahead: 0,
        time: "08:30",
        event: "US Non-Farm Payrolls",
        importance: Impact::High,
        forecast: "200K",
        previous: "180K",
    },
    ScheduledEvent {
        days_ahead: 1,
        time: "14:00",
        event: "Fed Interest Rate Decision",
        importance: Impact::High,
        forecast: "5.25%",
        previous: "5.00%",
    },
    ScheduledEvent {
        days_ahead: 2,
        time: "09:00",
        event: "EU GDP Growth Rate",
        importance: Impact::Medium,
        forecast: "0.3%",
        previous: "0.1%",
    },
    ScheduledEvent {
        days_ahead: 3,
        time: "10:00",
        event: "China GDP Annual Growth Rate",
        importance: Impact::High,
        forecast: "5.2%",
        previous: "5.0%",
    },
];

pub const SECTORS: &[&str] = &["technology", "finance", "energy", "healthcare"];

pub const PREDICTIONS: &[&str] = &[
    "Situation likely to escalate in the coming weeks",
    "Diplomatic resolution expected within months",
    "Economic impact will be significant",
    "Regional stability may be affected",
    "International intervention possible",
];

pub const TOPIC_KEYWORDS: &[&str] = &[
    "war",
    "peace",
    "economy",
    "trade",
    "sanctions",
    "diplomacy",
    "conflict",
    "alliance",
];
