//! reqwest-backed transport

use std::time::Duration;

use tracing::debug;

use crate::error::SetupError;
use crate::transport::{RawResponse, Transport, TransportError};

/// Plain HTTP GET against a fixed path
pub struct HttpTransport {
    client: reqwest::Client,
    path: String,
}

impl HttpTransport {
    /// Creates a transport requesting `path` with the given timeout
    pub fn new(path: &str, timeout: Duration) -> Result<Self, SetupError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("version-probe/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Ok(Self { client, path })
    }

    /// The URL requested for `host:port`
    pub fn url(&self, host: &str, port: u16) -> String {
        format!("http://{}:{}{}", host, port, self.path)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, host: &str, port: u16) -> Result<RawResponse, TransportError> {
        let url = self.url(host, port);
        debug!("GET {}", url);
        let url = reqwest::Url::parse(&url)
            .map_err(|e| TransportError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!("response: {}", status);
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
