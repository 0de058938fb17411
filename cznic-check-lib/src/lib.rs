//! # cznic-check Library
//!
//! Checks whether a second-level `.cz` domain is registered by reading the
//! public CZ.NIC lookup page instead of the rate-limited WHOIS port.
//!
//! A check normalizes the input to `name.cz`, fetches
//! `https://www.nic.cz/whois/domain/<name>.cz`, waits for the user whenever
//! the page shows a captcha, and then looks for either the "free" marker or
//! the expiration date.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use chrono::Utc;
//! use cznic_check_lib::{format_line, CaptchaPrompt, CheckConfig, CheckError, DomainChecker};
//!
//! struct GiveUp;
//!
//! #[async_trait]
//! impl CaptchaPrompt for GiveUp {
//!     async fn wait_for_user(&self, url: &str) -> Result<(), CheckError> {
//!         Err(CheckError::internal(format!("captcha required at {}", url)))
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = DomainChecker::new(CheckConfig::default(), GiveUp)?;
//!     let result = checker.check_domain("nic.cz").await?;
//!     println!("{}", format_line(&result, Utc::now()));
//!     Ok(())
//! }
//! ```

// Re-export main public API types and functions
pub use checker::{CaptchaPrompt, DomainChecker};
pub use error::CheckError;
pub use page::{parse_cz_date, parse_page, ExpirationExtractor, FixedOffsetExtractor};
pub use protocols::{query_url, PageSource, WebClient};
pub use report::{days_until, format_line, DomainStatus, StatusReport};
pub use types::{CheckConfig, CheckResult, PageLayout, DEFAULT_BASE_URL};
pub use utils::normalize_cz_domain;

mod checker;
mod error;
mod page;
mod protocols;
mod report;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, CheckError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
