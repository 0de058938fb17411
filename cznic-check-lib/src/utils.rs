//! Utility functions for domain processing and validation.
//!
//! Turns whatever the user typed into the `name.cz` host the lookup page
//! expects.

use crate::error::CheckError;
use url::Url;

const CZ_SUFFIX: &str = ".cz";

/// Normalize raw input into a second-level `.cz` host.
///
/// Accepts bare names (`example`), hosts (`example.cz`) and URLs
/// (`http://example.cz/`). A scheme is prepended when missing and the `.cz`
/// suffix is appended when absent, then the host is taken from the parsed
/// URL.
///
/// # Errors
///
/// Returns `CheckError::InvalidDomain` if the input does not parse as a URL,
/// has no host, or the host is not a second-level `.cz` domain.
pub fn normalize_cz_domain(input: &str) -> Result<String, CheckError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(CheckError::invalid_domain(
            input,
            "Domain name cannot be empty",
        ));
    }

    let mut candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    if !candidate.to_ascii_lowercase().ends_with(CZ_SUFFIX) {
        candidate.push_str(CZ_SUFFIX);
    }

    let parsed = Url::parse(&candidate)
        .map_err(|e| CheckError::invalid_domain(input, format!("Not a valid URL: {}", e)))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| CheckError::invalid_domain(input, "No host name found"))?;

    if host.matches('.').count() > 1 {
        return Err(CheckError::invalid_domain(
            input,
            "You can check only second-level .cz domains",
        ));
    }

    match host.strip_suffix(CZ_SUFFIX) {
        Some(label) if is_valid_label(label) => Ok(host.to_string()),
        Some(_) => Err(CheckError::invalid_domain(
            input,
            "Domain label must be non-empty and must not start or end with a hyphen",
        )),
        None => Err(CheckError::invalid_domain(
            input,
            "Only .cz domains are supported",
        )),
    }
}

/// Validate the part in front of `.cz`.
fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && !label.starts_with('-') && !label.ends_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_appends_suffix() {
        assert_eq!(normalize_cz_domain("example").unwrap(), "example.cz");
        assert_eq!(normalize_cz_domain("example.cz").unwrap(), "example.cz");
    }

    #[test]
    fn test_normalize_strips_scheme_and_path() {
        assert_eq!(normalize_cz_domain("http://example.cz").unwrap(), "example.cz");
        assert_eq!(normalize_cz_domain("https://example.cz").unwrap(), "example.cz");
        assert_eq!(
            normalize_cz_domain("http://example.cz/whatever.cz").unwrap(),
            "example.cz"
        );
    }

    #[test]
    fn test_normalize_is_case_insensitive() {
        assert_eq!(normalize_cz_domain("Example.CZ").unwrap(), "example.cz");
        assert_eq!(normalize_cz_domain("  nic.cz\n").unwrap(), "nic.cz");
    }

    #[test]
    fn test_normalize_rejects_subdomains() {
        let err = normalize_cz_domain("sub.example.cz").unwrap_err();
        assert!(matches!(err, CheckError::InvalidDomain { .. }));
        assert!(err.to_string().contains("second-level"));
    }

    #[test]
    fn test_normalize_rejects_other_tlds() {
        // "example.com" gains a ".cz" suffix and becomes third-level
        assert!(normalize_cz_domain("example.com").is_err());
        assert!(normalize_cz_domain("http://example.com/").is_err());
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_cz_domain("").is_err());
        assert!(normalize_cz_domain("   ").is_err());
        assert!(normalize_cz_domain(".cz").is_err());
        assert!(normalize_cz_domain("-bad").is_err());
        assert!(normalize_cz_domain("http://").is_err());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["example", "example.cz", "http://example.cz", "Nic.Cz"] {
            let once = normalize_cz_domain(input).unwrap();
            let twice = normalize_cz_domain(&once).unwrap();
            assert_eq!(once, twice, "input: {}", input);
        }
    }
}
