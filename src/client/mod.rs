//! HTTP transport used by every source adapter
//!
//! - `HttpClient`: reqwest-backed transport with a request timeout
//! - `MockTransport`: scripted responses for tests and offline runs

mod http;
pub mod mock;
#[cfg(test)]
mod tests;

pub use http::HttpClient;
pub use mock::{MockReply, MockTransport};

use crate::error::Result;
use async_trait::async_trait;

/// GET request against a remote source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Value for the `Accept` header
    pub accept: &'static str,
}

impl Request {
    pub fn json(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            accept: "application/json",
        }
    }

    pub fn xml(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            accept: "application/rss+xml, application/xml, text/xml",
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// URL plus query string, used for logging and mock routing
    pub fn describe(&self) -> String {
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!("{}?{}", self.url, query.join("&"))
    }
}

/// Transport abstraction (allows mocking)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a single GET and return the body of a 2xx response
    async fn get(&self, request: &Request) -> Result<String>;
}
