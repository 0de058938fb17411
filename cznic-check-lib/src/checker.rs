//! Main domain checker implementation.
//!
//! `DomainChecker` ties the pieces together for one domain at a time:
//! normalize, fetch, wait out captchas, parse.

use crate::error::CheckError;
use crate::page::{parse_page, ExpirationExtractor, FixedOffsetExtractor};
use crate::protocols::{query_url, PageSource, WebClient};
use crate::types::{CheckConfig, CheckResult};
use crate::utils::normalize_cz_domain;
use async_trait::async_trait;

/// Blocks until someone has solved the captcha out of band.
#[async_trait]
pub trait CaptchaPrompt: Send + Sync {
    /// Tell the user to open `query_url` in a browser and wait until they
    /// confirm. Returning `Ok` means "fetch again".
    async fn wait_for_user(&self, query_url: &str) -> Result<(), CheckError>;
}

/// Where a single check currently stands.
#[derive(Debug)]
enum CheckState {
    Fetching,
    CaptchaBlocked,
    Parsed(CheckResult),
}

/// Checks second-level `.cz` domains against the lookup page.
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use cznic_check_lib::{CaptchaPrompt, CheckConfig, CheckError, DomainChecker};
///
/// struct Never;
///
/// #[async_trait]
/// impl CaptchaPrompt for Never {
///     async fn wait_for_user(&self, url: &str) -> Result<(), CheckError> {
///         Err(CheckError::internal(format!("captcha at {}", url)))
///     }
/// }
///
/// # async fn run() -> Result<(), CheckError> {
/// let checker = DomainChecker::new(CheckConfig::default(), Never)?;
/// let result = checker.check_domain("nic").await?;
/// println!("{} free: {}", result.domain, result.is_free);
/// # Ok(())
/// # }
/// ```
pub struct DomainChecker<P, S = WebClient> {
    config: CheckConfig,
    source: S,
    prompt: P,
    extractor: Box<dyn ExpirationExtractor>,
}

impl<P: CaptchaPrompt> DomainChecker<P, WebClient> {
    /// Create a checker that talks HTTP using the configured timeout.
    pub fn new(config: CheckConfig, prompt: P) -> Result<Self, CheckError> {
        let source = WebClient::with_timeout(config.timeout)?;
        Ok(Self::with_source(config, source, prompt))
    }
}

impl<P: CaptchaPrompt, S: PageSource> DomainChecker<P, S> {
    /// Create a checker on top of any page source.
    pub fn with_source(config: CheckConfig, source: S, prompt: P) -> Self {
        let extractor = Box::new(FixedOffsetExtractor::from_layout(&config.layout));
        Self {
            config,
            source,
            prompt,
            extractor,
        }
    }

    /// Replace the expiration date strategy.
    pub fn with_extractor<E: ExpirationExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Check a single domain.
    ///
    /// The captcha loop has no retry limit: every time the page shows the
    /// captcha marker, the prompt is awaited and the same URL is fetched
    /// again.
    ///
    /// # Errors
    ///
    /// Returns `CheckError` if the input is not a second-level `.cz` domain,
    /// the fetch fails, the page does not contain the expected markers, or
    /// the prompt fails.
    pub async fn check_domain(&self, raw: &str) -> Result<CheckResult, CheckError> {
        let host = normalize_cz_domain(raw)?;
        let url = query_url(&self.config.base_url, &host);
        let layout = &self.config.layout;

        let mut captcha_rounds = 0u32;
        let mut state = CheckState::Fetching;

        loop {
            state = match state {
                CheckState::Fetching => {
                    let body = self.source.fetch(&url).await?;
                    if body.contains(&layout.captcha_marker) {
                        CheckState::CaptchaBlocked
                    } else {
                        let result = parse_page(&host, &body, layout, self.extractor.as_ref())?;
                        CheckState::Parsed(result)
                    }
                }
                CheckState::CaptchaBlocked => {
                    captcha_rounds += 1;
                    tracing::debug!(url = %url, captcha_rounds, "captcha shown, waiting for user");
                    self.prompt.wait_for_user(&url).await?;
                    CheckState::Fetching
                }
                CheckState::Parsed(result) => {
                    tracing::debug!(domain = %result.domain, is_free = result.is_free, "page parsed");
                    return Ok(result);
                }
            };
        }
    }

    /// Get the configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}
