//! Error handling for domain checking operations.
//!
//! Every failure here is fatal for the domain being checked. The captcha
//! challenge is not an error; it is handled by the checker's state machine.

use std::fmt;

/// Main error type for domain checking operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckError {
    /// The input could not be turned into a second-level `.cz` host
    InvalidDomain { domain: String, reason: String },

    /// Transport-level failure (DNS, connection, timeout)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// The lookup page answered with anything but 200
    HttpStatus { url: String, status_code: u16 },

    /// Neither the free marker nor the expiration marker was on the page
    MarkerNotFound { domain: String, marker: String },

    /// The text at the expiration offset is not a `DD.MM.YYYY` date
    DateParse {
        domain: String,
        input: String,
        reason: String,
    },

    /// Local I/O failures, e.g. stdin closing while waiting for the user
    Internal { message: String },
}

impl CheckError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new HTTP status error.
    pub fn http_status<U: Into<String>>(url: U, status_code: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status_code,
        }
    }

    /// Create a new marker-not-found error.
    pub fn marker_not_found<D: Into<String>, M: Into<String>>(domain: D, marker: M) -> Self {
        Self::MarkerNotFound {
            domain: domain.into(),
            marker: marker.into(),
        }
    }

    /// Create a new date parse error.
    pub fn date_parse<D: Into<String>, I: Into<String>, R: Into<String>>(
        domain: D,
        input: I,
        reason: R,
    ) -> Self {
        Self::DateParse {
            domain: domain.into(),
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the page was fetched fine but did not look like we expect.
    ///
    /// This usually means the registry changed its markup and the page
    /// layout needs adjusting.
    pub fn is_page_mismatch(&self) -> bool {
        matches!(self, Self::MarkerNotFound { .. } | Self::DateParse { .. })
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::HttpStatus { url, status_code } => {
                write!(f, "HTTP error for '{}': returned code {}", url, status_code)
            }
            Self::MarkerNotFound { domain, marker } => {
                write!(f, "Marker '{}' not found on page for '{}'", marker, domain)
            }
            Self::DateParse {
                domain,
                input,
                reason,
            } => {
                write!(
                    f,
                    "Cannot read expiration date '{}' for '{}': {}",
                    input, domain, reason
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for CheckError {}

impl From<reqwest::Error> for CheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timed out", err.to_string())
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<std::io::Error> for CheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}
