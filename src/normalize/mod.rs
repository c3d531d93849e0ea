//! Source schema → view-model mapping
//!
//! Every function here is pure: raw payload in, normalized record out.
//! Missing optional fields take documented defaults instead of failing;
//! only a payload with the wrong overall shape is an error.

pub mod alpha_vantage;
pub mod countries;
pub mod exchange_rates;
pub mod news_api;
pub mod rss;
pub mod world_bank;

use lazy_static::lazy_static;
use quick_xml::escape::unescape;
use regex::Regex;

lazy_static! {
    static ref TAGS: Regex = Regex::new(r"<[^>]*>").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref IMG_SRC: Regex = Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("valid regex");
}

/// Marker appended by `truncate`; no bound may be shorter than this
pub const ELLIPSIS: &str = "...";

/// Remove HTML tags, decode character references and collapse whitespace.
/// Text with a bare `&` keeps its references undecoded.
pub fn strip_markup(html: &str) -> String {
    let text = TAGS.replace_all(html, " ");
    let text = text.replace("&nbsp;", " ").replace('\u{a0}', " ");
    let text = unescape(&text)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| text.clone());
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Truncate to at most `limit` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push_str(ELLIPSIS);
    out
}

/// First `<img src>` embedded in an HTML fragment
pub fn extract_image(html: &str) -> Option<String> {
    IMG_SRC
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Markup-free description bounded to `limit` characters
pub fn clean_description(html: &str, limit: usize) -> String {
    truncate(&strip_markup(html), limit)
}
