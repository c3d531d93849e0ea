//! Article annotation
//!
//! Sentiment, impact and risk are synthetic draws; key topics and keyword
//! classification are deterministic.

use crate::fallback::tables::{PREDICTIONS, TOPIC_KEYWORDS};
use crate::fallback::FallbackGenerator;
use crate::types::{ArticleAnalysis, Category, Impact, NewsArticle, Sentiment};
use rand::Rng;

const MAX_TOPICS: usize = 3;

/// Keywords from the topic list present in `text`, at most three
pub fn key_topics(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .take(MAX_TOPICS)
        .map(|k| k.to_string())
        .collect()
}

/// Keyword-based category for articles without one (search results)
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["war", "conflict", "military"]) {
        Category::Conflicts
    } else if has(&["economy", "trade", "market"]) {
        Category::Economy
    } else if has(&["diplomacy", "treaty", "negotiation"]) {
        Category::Diplomacy
    } else if has(&["technology", "cyber", "digital"]) {
        Category::Technology
    } else {
        Category::General
    }
}

pub fn analyze(article: &NewsArticle, generator: &FallbackGenerator) -> ArticleAnalysis {
    let text = format!("{} {}", article.title, article.description);
    let key_topics = key_topics(&text);

    generator.with_rng(|rng| {
        let sentiment = match rng.random_range(0..3u8) {
            0 => Sentiment::Positive,
            1 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        };
        let impact = match rng.random_range(0..3u8) {
            0 => Impact::High,
            1 => Impact::Medium,
            _ => Impact::Low,
        };

        ArticleAnalysis {
            sentiment,
            impact,
            confidence: 0.7 + rng.random::<f64>() * 0.3,
            key_topics,
            risk_score: rng.random::<f64>() * 10.0,
            prediction: PREDICTIONS[rng.random_range(0..PREDICTIONS.len())]
                .to_string(),
        }
    })
}

/// Attach an analysis to every article, returning a new collection
pub fn annotate(articles: Vec<NewsArticle>, generator: &FallbackGenerator) -> Vec<NewsArticle> {
    articles
        .into_iter()
        .map(|article| {
            let analysis = analyze(&article, generator);
            NewsArticle {
                analysis: Some(analysis),
                ..article
            }
        })
        .collect()
}
