//! reqwest-backed transport

use super::{HttpTransport, Request};
use crate::config::HttpConfig;
use crate::error::{GeoError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use tracing::debug;

/// Shared HTTP client; cloning is cheap
#[derive(Clone)]
pub struct HttpClient {
    http: Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    async fn get(&self, request: &Request) -> Result<String> {
        debug!("GET {}", request.describe());

        let response = self
            .http
            .get(&request.url)
            .query(&request.query)
            .header(header::ACCEPT, request.accept)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let message = response.text().await.unwrap_or_default();
            return Err(GeoError::RateLimited {
                source_name: request.url.clone(),
                message,
            });
        }
        if !status.is_success() {
            return Err(GeoError::Status {
                status: status.as_u16(),
                url: request.url.clone(),
            });
        }

        Ok(response.text().await?)
    }
}
