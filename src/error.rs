//! Error types for the data layer
//!
//! Adapters never hand these to their callers: every variant is caught at the
//! adapter boundary, logged, and converted into fallback output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Rate limited by {source_name}: {message}")]
    RateLimited { source_name: String, message: String },

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GeoError {
    /// Transport-level failure (network, DNS, timeout) or non-success status
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GeoError::Network(_)
                | GeoError::Connection(_)
                | GeoError::Status { .. }
                | GeoError::RateLimited { .. }
        )
    }

    /// Payload arrived but did not have the expected shape
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            GeoError::Malformed(_) | GeoError::Json(_) | GeoError::Xml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
