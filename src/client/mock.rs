//! Mock transport for testing
//!
//! Routes requests by substring match on `Request::describe()`:
//! - Unit tests without network calls
//! - Forced transport failures and malformed payloads
//! - Slow responses for fan-out timing tests

use super::{HttpTransport, Request};
use crate::error::{GeoError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Scripted reply for a route
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with this body
    Body(String),
    /// Non-success status
    Status(u16),
    /// Network/DNS-level failure
    Unreachable,
}

impl MockReply {
    /// 2xx with `value` serialized as the body
    pub fn json(value: serde_json::Value) -> Self {
        MockReply::Body(value.to_string())
    }
}

#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Vec<(String, MockReply)>,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reply for requests whose description contains `pattern`.
    /// Earlier routes win.
    pub fn route(mut self, pattern: &str, reply: MockReply) -> Self {
        self.routes.push((pattern.to_string(), reply));
        self
    }

    /// Delay every reply
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests seen so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, pattern: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.contains(pattern))
            .count()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, request: &Request) -> Result<String> {
        let described = request.describe();
        self.calls.lock().push(described.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .routes
            .iter()
            .find(|(pattern, _)| described.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or(MockReply::Unreachable);

        match reply {
            MockReply::Body(body) => Ok(body),
            MockReply::Status(429) => Err(GeoError::RateLimited {
                source_name: request.url.clone(),
                message: "mock quota exhausted".to_string(),
            }),
            MockReply::Status(status) => Err(GeoError::Status {
                status,
                url: request.url.clone(),
            }),
            MockReply::Unreachable => Err(GeoError::Connection(format!(
                "no route to {}",
                request.url
            ))),
        }
    }
}
