//! Lookup page parsing.
//!
//! The page is never parsed as HTML. A registered domain is recognized by the
//! absence of the "free" marker, and its expiration date is cut out of the
//! text at a fixed distance from the expiration label. That cut is hidden
//! behind [`ExpirationExtractor`] so a markup change touches one type.

use crate::error::CheckError;
use crate::types::{CheckResult, PageLayout};
use chrono::NaiveDate;

/// Strategy that pulls the expiration date out of a fetched page.
pub trait ExpirationExtractor: Send + Sync {
    /// Find and parse the expiration date for `domain` in `body`.
    fn extract(&self, domain: &str, body: &str) -> Result<NaiveDate, CheckError>;
}

/// Reads the date at a fixed byte offset from a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedOffsetExtractor {
    marker: String,
    offset: usize,
    length: usize,
}

impl FixedOffsetExtractor {
    pub fn new<M: Into<String>>(marker: M, offset: usize, length: usize) -> Self {
        Self {
            marker: marker.into(),
            offset,
            length,
        }
    }

    pub fn from_layout(layout: &PageLayout) -> Self {
        Self::new(
            layout.expiration_marker.clone(),
            layout.expiration_offset,
            layout.expiration_length,
        )
    }
}

impl ExpirationExtractor for FixedOffsetExtractor {
    fn extract(&self, domain: &str, body: &str) -> Result<NaiveDate, CheckError> {
        let index = body
            .find(&self.marker)
            .ok_or_else(|| CheckError::marker_not_found(domain, self.marker.as_str()))?;

        let window = index
            .checked_add(self.offset)
            .and_then(|start| start.checked_add(self.length).map(|end| (start, end)));

        // `get` refuses ranges past the end or inside a multi-byte character
        let raw = window.and_then(|(start, end)| body.get(start..end)).ok_or_else(|| {
            CheckError::date_parse(
                domain,
                "",
                format!(
                    "no {}-byte date at offset {} after '{}'",
                    self.length, self.offset, self.marker
                ),
            )
        })?;

        parse_cz_date(raw).map_err(|reason| CheckError::date_parse(domain, raw, reason))
    }
}

/// Parse a `DD.MM.YYYY` date as printed on the lookup page.
///
/// Returns a short reason on failure so callers can attach the domain.
pub fn parse_cz_date(input: &str) -> Result<NaiveDate, String> {
    let bytes = input.as_bytes();

    if bytes.len() != 10 {
        return Err(format!("expected 10 characters, got {}", bytes.len()));
    }

    if bytes[2] != b'.' || bytes[5] != b'.' {
        return Err("expected '.' separators (DD.MM.YYYY)".to_string());
    }

    let digits_ok = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 5)
        .all(|(_, b)| b.is_ascii_digit());
    if !digits_ok {
        return Err("day, month and year must be numeric".to_string());
    }

    NaiveDate::parse_from_str(input, "%d.%m.%Y").map_err(|e| format!("not a calendar date: {}", e))
}

/// Turn a fetched (captcha-free) page into a result.
///
/// The free marker wins over everything else on the page; otherwise the
/// extractor must find an expiration date.
pub fn parse_page(
    domain: &str,
    body: &str,
    layout: &PageLayout,
    extractor: &dyn ExpirationExtractor,
) -> Result<CheckResult, CheckError> {
    if body.contains(&layout.free_marker) {
        return Ok(CheckResult::free(domain));
    }

    let expiration = extractor.extract(domain, body)?;
    Ok(CheckResult::registered(domain, expiration))
}
