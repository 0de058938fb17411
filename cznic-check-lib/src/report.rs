//! Turning results into the one-line status the CLI prints.

use crate::types::CheckResult;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

/// Human-facing state of a checked domain relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainStatus {
    Free,
    ExpiresToday,
    /// Days left, always positive
    ExpiresIn(i64),
    /// Days since expiration, always positive
    ExpiredAgo(i64),
}

impl DomainStatus {
    /// Classify a result. A registered result without a date is treated as
    /// expiring today.
    pub fn from_result(result: &CheckResult, now: DateTime<Utc>) -> Self {
        if result.is_free {
            return Self::Free;
        }

        match result.expiration.map(|date| days_until(date, now)) {
            None | Some(0) => Self::ExpiresToday,
            Some(days) if days > 0 => Self::ExpiresIn(days),
            Some(days) => Self::ExpiredAgo(-days),
        }
    }

    /// Signed day count; `None` for free domains.
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::Free => None,
            Self::ExpiresToday => Some(0),
            Self::ExpiresIn(days) => Some(*days),
            Self::ExpiredAgo(days) => Some(-days),
        }
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::ExpiresToday => write!(f, "Expires today"),
            Self::ExpiresIn(1) => write!(f, "Expires in 1 day"),
            Self::ExpiresIn(days) => write!(f, "Expires in {} days", days),
            Self::ExpiredAgo(1) => write!(f, "Expired 1 day ago"),
            Self::ExpiredAgo(days) => write!(f, "Expired {} days ago", days),
        }
    }
}

/// Whole days from `now` until the expiration date.
///
/// Expiration is always midnight UTC, so the time of day of `now` is dropped
/// and the difference is taken between calendar dates.
pub fn days_until(expiration: NaiveDate, now: DateTime<Utc>) -> i64 {
    (expiration - now.date_naive()).num_days()
}

/// Format the `<domain>\t<status>` line for a result.
pub fn format_line(result: &CheckResult, now: DateTime<Utc>) -> String {
    format!(
        "{}\t{}",
        result.domain,
        DomainStatus::from_result(result, now)
    )
}

/// Serializable form of a reported result (used for JSON output).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub domain: String,
    pub is_free: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    pub status: String,
}

impl StatusReport {
    pub fn new(result: &CheckResult, now: DateTime<Utc>) -> Self {
        let status = DomainStatus::from_result(result, now);
        Self {
            domain: result.domain.clone(),
            is_free: result.is_free,
            expiration: result.expiration,
            days: status.days(),
            status: status.to_string(),
        }
    }
}
