//! Google News RSS documents
//!
//! Item descriptions arrive as escaped HTML (a link, a `&nbsp;` run and a
//! `<font>` source tag); titles end in " - Source Name".

use super::{clean_description, extract_image};
use crate::error::{GeoError, Result};
use crate::types::{Category, NewsArticle};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

lazy_static! {
    // Google News appends " - Source Name" to every title
    static ref SOURCE_SUFFIX: Regex = Regex::new(r"\s-\s[^-]*$").expect("valid regex");
}

const DEFAULT_SOURCE: &str = "Google News";

/// Bounds applied while mapping items
#[derive(Debug, Clone, Copy)]
pub struct FeedLimits {
    pub max_items: usize,
    pub description_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
    PubDate,
    Source,
}

#[derive(Debug, Default)]
struct RawItem {
    title: String,
    link: String,
    description: String,
    pub_date: String,
    source: String,
}

impl RawItem {
    fn push(&mut self, field: Field, text: &str) {
        let target = match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Description => &mut self.description,
            Field::PubDate => &mut self.pub_date,
            Field::Source => &mut self.source,
        };
        target.push_str(text);
    }
}

fn field_for(name: &[u8]) -> Option<Field> {
    match name {
        b"title" => Some(Field::Title),
        b"link" => Some(Field::Link),
        b"description" => Some(Field::Description),
        b"pubDate" => Some(Field::PubDate),
        b"source" => Some(Field::Source),
        _ => None,
    }
}

fn read_items(xml: &str) -> Result<Vec<RawItem>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<RawItem> = None;
    let mut field: Option<Field> = None;
    let mut saw_channel = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"rss" | b"channel" => saw_channel = true,
                b"item" => current = Some(RawItem::default()),
                name if current.is_some() => field = field_for(name),
                _ => {}
            },
            Event::Text(t) => {
                if let (Some(item), Some(f)) = (current.as_mut(), field) {
                    let text = t
                        .unescape()
                        .map_err(|e| GeoError::Malformed(format!("bad RSS text: {}", e)))?;
                    item.push(f, &text);
                }
            }
            Event::CData(c) => {
                if let (Some(item), Some(f)) = (current.as_mut(), field) {
                    item.push(f, &String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_channel {
        return Err(GeoError::Malformed("document is not an RSS feed".to_string()));
    }

    Ok(items)
}

/// Parse an RSS document into articles tagged with `category`.
///
/// `feed_key` keeps ids unique when several feeds are merged.
pub fn parse_feed(
    xml: &str,
    category: Category,
    feed_key: &str,
    limits: FeedLimits,
    now: DateTime<Utc>,
) -> Result<Vec<NewsArticle>> {
    let items = read_items(xml)?;
    let stamp = now.timestamp_millis();

    let articles = items
        .into_iter()
        .take(limits.max_items)
        .enumerate()
        .map(|(index, item)| {
            let title = SOURCE_SUFFIX.replace(item.title.trim(), "").to_string();
            let published_at = DateTime::parse_from_rfc2822(item.pub_date.trim())
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or(now);
            let source_name = match item.source.trim() {
                "" => DEFAULT_SOURCE.to_string(),
                s => s.to_string(),
            };

            NewsArticle {
                id: format!("google-news-{}-{}-{}", feed_key, stamp, index),
                title,
                description: clean_description(&item.description, limits.description_limit),
                url: item.link.trim().to_string(),
                image_url: extract_image(&item.description),
                published_at,
                source_name,
                category,
                is_google_news: false,
                is_fresh: false,
                analysis: None,
            }
        })
        .collect();

    Ok(articles)
}
