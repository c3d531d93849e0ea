//! NewsAPI `/top-headlines` and `/everything` responses

use super::clean_description;
use crate::error::{GeoError, Result};
use crate::types::{Category, NewsArticle};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    source: Option<NewsApiSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

pub fn parse_articles(
    body: &str,
    category: Category,
    description_limit: usize,
    now: DateTime<Utc>,
) -> Result<Vec<NewsArticle>> {
    let response: NewsApiResponse = serde_json::from_str(body)?;

    if response.status != "ok" {
        return Err(GeoError::Malformed(
            response
                .message
                .unwrap_or_else(|| format!("NewsAPI status {}", response.status)),
        ));
    }

    let stamp = now.timestamp_millis();
    let articles = response
        .articles
        .into_iter()
        // NewsAPI marks takedowns with a "[Removed]" title
        .filter(|a| a.title.as_deref().is_some_and(|t| t != "[Removed]"))
        .enumerate()
        .map(|(index, a)| NewsArticle {
            id: format!("newsapi-{}-{}", stamp, index),
            title: a.title.unwrap_or_default(),
            description: clean_description(&a.description.unwrap_or_default(), description_limit),
            url: a.url.unwrap_or_default(),
            image_url: a.url_to_image.filter(|u| !u.is_empty()),
            published_at: a
                .published_at
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or(now),
            source_name: a
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "NewsAPI".to_string()),
            category,
            is_google_news: false,
            is_fresh: false,
            analysis: None,
        })
        .collect();

    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_articles() {
        let body = r#"{"status":"ok","totalResults":2,"articles":[
            {"source":{"id":"bbc-news","name":"BBC News"},"title":"Ceasefire holds",
             "description":"<p>Both sides <b>report</b> calm</p>","url":"https://bbc.example/1",
             "urlToImage":"https://bbc.example/1.jpg","publishedAt":"2025-01-06T10:00:00Z"},
            {"source":{"id":null,"name":null},"title":"[Removed]","description":null,"url":null}
        ]}"#;
        let articles = parse_articles(body, Category::Conflicts, 200, Utc::now()).unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Ceasefire holds");
        assert_eq!(articles[0].description, "Both sides report calm");
        assert_eq!(articles[0].source_name, "BBC News");
        assert_eq!(articles[0].image_url.as_deref(), Some("https://bbc.example/1.jpg"));
    }

    #[test]
    fn test_error_status() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid"}"#;
        let err = parse_articles(body, Category::General, 200, Utc::now()).unwrap_err();
        assert!(err.to_string().contains("API key is invalid"));
    }
}
