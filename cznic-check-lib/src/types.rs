//! Core data types for domain checking.
//!
//! This module defines the result record produced for every domain and the
//! configuration that is built once at startup and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lookup page used when no other base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.nic.cz/whois/domain/";

/// Result of a single domain check.
///
/// Created once per successfully parsed page and consumed by the reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Normalized host that was checked (e.g., "example.cz")
    pub domain: String,

    /// Whether the registry reports the domain as not registered
    pub is_free: bool,

    /// Expiration date (midnight UTC); only set for registered domains
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<NaiveDate>,
}

impl CheckResult {
    /// Result for a domain the registry does not know.
    pub fn free<D: Into<String>>(domain: D) -> Self {
        Self {
            domain: domain.into(),
            is_free: true,
            expiration: None,
        }
    }

    /// Result for a registered domain with a known expiration date.
    pub fn registered<D: Into<String>>(domain: D, expiration: NaiveDate) -> Self {
        Self {
            domain: domain.into(),
            is_free: false,
            expiration: Some(expiration),
        }
    }
}

/// Where the interesting bits live on the lookup page.
///
/// The expiration offset and length are tied to the exact markup around the
/// "Datum expirace" label; when the registry changes its page, this is the
/// only thing that needs adjusting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Text shown when the page asks for a captcha
    pub captcha_marker: String,

    /// Text shown when the domain is not registered
    pub free_marker: String,

    /// Label in front of the expiration date
    pub expiration_marker: String,

    /// Byte distance from the start of `expiration_marker` to the date
    pub expiration_offset: usize,

    /// Byte length of the date text
    pub expiration_length: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            captcha_marker: "Kontrolní kód".to_string(),
            free_marker: "nebyla nalezena".to_string(),
            expiration_marker: "Datum expirace".to_string(),
            expiration_offset: 72,
            expiration_length: 10,
        }
    }
}

impl PageLayout {
    /// Override the expiration date position.
    pub fn with_expiration_window(mut self, offset: usize, length: usize) -> Self {
        self.expiration_offset = offset;
        self.expiration_length = length;
        self
    }
}

/// Configuration options for domain checking.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Base URL the normalized host is appended to
    /// Default: https://www.nic.cz/whois/domain/
    pub base_url: String,

    /// Timeout for a single page fetch
    /// Default: 10 seconds
    pub timeout: Duration,

    /// Pause after each fully processed domain
    /// Default: 1 second
    pub politeness: Duration,

    /// Markers and date position on the lookup page
    pub layout: PageLayout,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            politeness: Duration::from_secs(1),
            layout: PageLayout::default(),
        }
    }
}

impl CheckConfig {
    /// Point the checker at a different lookup page.
    pub fn with_base_url<U: Into<String>>(mut self, base_url: U) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set custom timeout for page fetches.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause between two domains.
    pub fn with_politeness(mut self, politeness: Duration) -> Self {
        self.politeness = politeness;
        self
    }

    /// Replace the page layout.
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert_eq!(config.base_url, "https://www.nic.cz/whois/domain/");
        assert_eq!(config.politeness, Duration::from_secs(1));
        assert_eq!(config.layout.expiration_offset, 72);
        assert_eq!(config.layout.expiration_length, 10);
        assert_eq!(config.layout.free_marker, "nebyla nalezena");
    }

    #[test]
    fn test_builder_methods() {
        let config = CheckConfig::default()
            .with_base_url("http://127.0.0.1:8080/domain/")
            .with_timeout(Duration::from_secs(3))
            .with_politeness(Duration::ZERO)
            .with_layout(PageLayout::default().with_expiration_window(40, 10));

        assert_eq!(config.base_url, "http://127.0.0.1:8080/domain/");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.politeness, Duration::ZERO);
        assert_eq!(config.layout.expiration_offset, 40);
    }

    #[test]
    fn test_result_serialization_skips_missing_expiration() {
        let free = serde_json::to_value(CheckResult::free("example.cz")).unwrap();
        assert_eq!(
            free,
            serde_json::json!({"domain": "example.cz", "is_free": true})
        );

        let date = NaiveDate::from_ymd_opt(2030, 2, 1).unwrap();
        let taken = serde_json::to_value(CheckResult::registered("nic.cz", date)).unwrap();
        assert_eq!(taken["expiration"], "2030-02-01");
    }
}
