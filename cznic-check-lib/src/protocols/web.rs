//! Lookup page fetching over plain HTTP GET.
//!
//! No custom headers, no retries. Anything but a 200 is an error; the captcha
//! page is a normal 200 and is recognized later by the checker.

use crate::error::CheckError;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Something that can fetch the lookup page for a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch `url` and return the body as text.
    async fn fetch(&self, url: &str) -> Result<String, CheckError>;
}

/// Build the lookup URL for a normalized host.
pub fn query_url(base_url: &str, host: &str) -> String {
    format!("{}{}", base_url, host)
}

/// HTTP client for the CZ.NIC lookup page.
#[derive(Clone)]
pub struct WebClient {
    http_client: reqwest::Client,
}

impl WebClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, CheckError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                CheckError::network_with_source("Failed to create HTTP client", e.to_string())
            })?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl PageSource for WebClient {
    async fn fetch(&self, url: &str) -> Result<String, CheckError> {
        tracing::debug!(url, "fetching lookup page");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();

        tracing::debug!(url, status = status.as_u16(), "lookup page responded");

        if status != StatusCode::OK {
            return Err(CheckError::http_status(url, status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
