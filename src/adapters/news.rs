//! Google News RSS feeds with NewsAPI and synthetic fallbacks
//!
//! Feed order for a category:
//! 1. Category RSS feed
//! 2. General feed top-up when a narrow category comes back short
//! 3. NewsAPI, only when a key is configured
//! 4. Synthetic headlines

use super::SharedTransport;
use crate::analysis::classify;
use crate::client::Request;
use crate::config::Config;
use crate::error::{GeoError, Result};
use crate::fallback::FallbackGenerator;
use crate::normalize::news_api::parse_articles;
use crate::normalize::rss::{parse_feed, FeedLimits};
use crate::resilient::{accept_any, attempt, DataSource, Sourced};
use crate::types::{Category, NewsArticle};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info};

const TOP_HEADLINES_PAGE: &str = "20";
const SEARCH_PAGE: &str = "10";

/// Search terms behind each category feed
fn feed_query(category: Category) -> &'static str {
    match category {
        Category::Conflicts => "conflict war military tensions",
        Category::Economy => "global economy trade sanctions",
        Category::Diplomacy => "diplomacy summit negotiations treaty",
        Category::Technology => "cyber warfare technology security",
        Category::General => "geopolitics international relations diplomacy",
    }
}

#[derive(Clone)]
pub struct NewsAdapter {
    transport: SharedTransport,
    google_news_url: String,
    news_api_url: String,
    news_api_key: Option<String>,
    limits: FeedLimits,
    top_up_threshold: usize,
    fallback: FallbackGenerator,
}

impl NewsAdapter {
    pub fn new(transport: SharedTransport, config: &Config, fallback: FallbackGenerator) -> Self {
        Self {
            transport,
            google_news_url: config
                .endpoints
                .google_news_url
                .trim_end_matches('/')
                .to_string(),
            news_api_url: config
                .endpoints
                .news_api_url
                .trim_end_matches('/')
                .to_string(),
            news_api_key: config.keys.news_api_key().map(str::to_string),
            limits: FeedLimits {
                max_items: config.news.max_items,
                description_limit: config.news.description_limit,
            },
            top_up_threshold: config.news.top_up_threshold,
            fallback,
        }
    }

    /// Articles for one category
    pub async fn category(&self, category: Category) -> Sourced<Vec<NewsArticle>> {
        let now = Utc::now();
        let mut articles = self
            .feed(category, feed_query(category), category.as_str(), now)
            .await
            .unwrap_or_default();

        if category.is_narrow() && articles.len() < self.top_up_threshold {
            info!(
                "{} feed returned {} items, topping up from general feed",
                category,
                articles.len()
            );
            let general = self
                .feed(Category::General, feed_query(Category::General), "general", now)
                .await
                .unwrap_or_default();
            top_up(&mut articles, general, self.limits.max_items);
        }

        if !articles.is_empty() {
            return Sourced::live(DataSource::GoogleNews, articles);
        }

        if let Some(key) = &self.news_api_key {
            let request = Request::json(format!("{}/top-headlines", self.news_api_url))
                .param("category", "general")
                .param("pageSize", TOP_HEADLINES_PAGE)
                .param("apiKey", key.as_str());
            if let Some(articles) = self
                .news_api(&request, category, "top headlines", now)
                .await
            {
                return Sourced::live(DataSource::NewsApi, articles);
            }
        }

        debug!("{} news: using synthetic headlines", category);
        Sourced::synthetic(self.fallback.headlines(now))
    }

    /// Articles matching a free-text query, categorized by keyword
    pub async fn search(&self, query: &str) -> Sourced<Vec<NewsArticle>> {
        let query = query.trim();
        let now = Utc::now();

        if let Some(articles) = self
            .feed(Category::General, query, "search", now)
            .await
            .filter(|a| !a.is_empty())
        {
            return Sourced::live(DataSource::GoogleNews, categorize(articles));
        }

        if let Some(key) = &self.news_api_key {
            let request = Request::json(format!("{}/everything", self.news_api_url))
                .param("q", query)
                .param("sortBy", "publishedAt")
                .param("pageSize", SEARCH_PAGE)
                .param("apiKey", key.as_str());
            if let Some(articles) = self
                .news_api(&request, Category::General, "search", now)
                .await
            {
                return Sourced::live(DataSource::NewsApi, categorize(articles));
            }
        }

        Sourced::synthetic(self.fallback.search_headlines(query, now))
    }

    async fn feed(
        &self,
        category: Category,
        query: &str,
        feed_key: &str,
        now: DateTime<Utc>,
    ) -> Option<Vec<NewsArticle>> {
        let request = Request::xml(format!("{}/rss/search", self.google_news_url))
            .param("q", query)
            .param("hl", "en-US")
            .param("gl", "US")
            .param("ceid", "US:en");

        attempt(
            DataSource::GoogleNews,
            &format!("{} feed", feed_key),
            async {
                let body = self.transport.get(&request).await?;
                parse_feed(&body, category, feed_key, self.limits, now)
            },
            accept_any,
        )
        .await
    }

    async fn news_api(
        &self,
        request: &Request,
        category: Category,
        what: &str,
        now: DateTime<Utc>,
    ) -> Option<Vec<NewsArticle>> {
        attempt(
            DataSource::NewsApi,
            what,
            async {
                let body = self.transport.get(request).await?;
                parse_articles(&body, category, self.limits.description_limit, now)
            },
            non_empty,
        )
        .await
    }
}

/// Append `extra` articles with unseen URLs until `max_items` is reached
fn top_up(articles: &mut Vec<NewsArticle>, extra: Vec<NewsArticle>, max_items: usize) {
    let mut seen: HashSet<String> = articles.iter().map(|a| a.url.clone()).collect();
    for article in extra {
        if articles.len() >= max_items {
            break;
        }
        if seen.insert(article.url.clone()) {
            articles.push(article);
        }
    }
}

fn categorize(articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
    articles
        .into_iter()
        .map(|article| NewsArticle {
            category: classify(&format!("{} {}", article.title, article.description)),
            ..article
        })
        .collect()
}

fn non_empty(articles: &Vec<NewsArticle>) -> Result<()> {
    if articles.is_empty() {
        return Err(GeoError::Malformed("no articles".to_string()));
    }
    Ok(())
}
