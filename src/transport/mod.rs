//! Transport layer: fetches the raw status page from the probed service
//!
//! - [`http`]: reqwest-backed implementation

pub mod http;

#[cfg(test)]
use mockall::automock;

use reqwest::StatusCode;
use thiserror::Error;

pub use http::HttpTransport;

/// A single HTTP response, consumed once by the check pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Trait for fetching a service's status page
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request against `host:port`.
    ///
    /// Any HTTP status is returned as a response; only failures to get a
    /// response at all are errors.
    async fn fetch(&self, host: &str, port: u16) -> Result<RawResponse, TransportError>;
}
