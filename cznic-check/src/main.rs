//! cznic-check CLI Application
//!
//! Checks whether second-level `.cz` domains are registered by reading the
//! CZ.NIC lookup page, one domain at a time with a pause in between.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{CommandFactory, Parser};
use cznic_check_lib::{CheckConfig, CheckError, DomainChecker};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for cznic-check
#[derive(Parser, Debug)]
#[command(name = "cznic-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check whether second-level .cz domains are registered")]
#[command(
    long_about = "Check whether second-level .cz domains are registered and when they expire.\n\nReads the public CZ.NIC lookup page instead of WHOIS. When the page asks for a captcha, solve it in a browser and press enter."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domains to check (example, example.cz or http://example.cz)
    #[arg(value_name = "DOMAINS", help_heading = "Domain Selection")]
    pub domains: Vec<String>,

    /// Interactive mode: prompt for domains until interrupted
    #[arg(
        short = 'i',
        long = "interactive",
        conflicts_with = "domains",
        help_heading = "Domain Selection"
    )]
    pub interactive: bool,

    /// Output one JSON object per domain
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Lookup page the domain is appended to
    #[arg(long = "base-url", value_name = "URL", help_heading = "Lookup Page")]
    pub base_url: Option<String>,

    /// Request timeout, e.g. 10s, 1m (default: 10s)
    #[arg(long = "timeout", value_name = "DURATION", value_parser = parse_duration, help_heading = "Lookup Page")]
    pub timeout: Option<Duration>,

    /// Pause after each domain, e.g. 500ms, 1s (default: 1s)
    #[arg(long = "delay", value_name = "DURATION", value_parser = parse_duration, help_heading = "Lookup Page")]
    pub delay: Option<Duration>,

    /// Bytes from the "Datum expirace" label to the date (default: 72)
    #[arg(
        long = "expiration-offset",
        value_name = "BYTES",
        help_heading = "Lookup Page"
    )]
    pub expiration_offset: Option<usize>,

    /// Verbose logging (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Input label for failures that happen before a domain is read.
const STDIN_LABEL: &str = "<stdin>";

/// A domain that stopped the run.
#[derive(Debug)]
struct Failure {
    input: String,
    error: CheckError,
}

impl Failure {
    fn new<I: Into<String>>(input: I, error: CheckError) -> Self {
        Self {
            input: input.into(),
            error,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    init_logging(args.verbose);

    if !args.interactive && args.domains.is_empty() {
        print_usage();
        return;
    }

    let config = build_config(&args);
    tracing::debug!(?config, "starting");

    let checker = match DomainChecker::new(config, ui::TerminalPrompt) {
        Ok(checker) => checker,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let outcome = if args.interactive {
        run_interactive(&checker, &args).await
    } else {
        run_batch(&checker, &args).await
    };

    if let Err(failure) = outcome {
        ui::print_failure(&failure.input, &failure.error);
        process::exit(1);
    }
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if let Some(base_url) = &args.base_url {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(format!(
                "Base URL must start with http:// or https://, got '{}'",
                base_url
            ));
        }
    }

    if args.timeout == Some(Duration::ZERO) {
        return Err("Timeout must be greater than zero".to_string());
    }

    Ok(())
}

/// Set up the stderr log stream. RUST_LOG wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "cznic_check=debug,cznic_check_lib=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Print usage and flags, as for `--help`.
fn print_usage() {
    let mut cmd = Args::command();
    if cmd.print_help().is_err() {
        eprintln!("Usage: cznic-check [-i] [DOMAINS]...");
    }
    println!();
}

/// Build CheckConfig from built-in defaults overlaid with CLI arguments.
fn build_config(args: &Args) -> CheckConfig {
    let mut config = CheckConfig::default();

    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(timeout);
    }
    if let Some(delay) = args.delay {
        config = config.with_politeness(delay);
    }
    if let Some(offset) = args.expiration_offset {
        config.layout.expiration_offset = offset;
    }

    config
}

/// Parse duration strings like "500ms", "5s", "2m"; bare numbers are seconds.
fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim().to_lowercase();

    let parsed = if let Some(ms) = value.strip_suffix("ms") {
        ms.parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = value.strip_suffix('s') {
        secs.parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = value.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| Duration::from_secs(m * 60))
    } else {
        value.parse::<u64>().ok().map(Duration::from_secs)
    };

    parsed.ok_or_else(|| format!("Invalid duration '{}' (use e.g. 500ms, 1s, 2m)", value))
}

/// Check every domain from the command line in order, stopping at the first
/// failure.
async fn run_batch(
    checker: &DomainChecker<ui::TerminalPrompt>,
    args: &Args,
) -> Result<(), Failure> {
    for domain in &args.domains {
        process_domain(checker, domain, args).await?;
    }
    Ok(())
}

/// Prompt for domains until stdin closes or a check fails.
async fn run_interactive(
    checker: &DomainChecker<ui::TerminalPrompt>,
    args: &Args,
) -> Result<(), Failure> {
    println!("Press CTRL-C to quit.");

    loop {
        let line = match ui::read_domain() {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(()),
            Err(e) => return Err(Failure::new(STDIN_LABEL, e.into())),
        };

        let domain = line.trim();
        if domain.is_empty() {
            continue;
        }

        process_domain(checker, domain, args).await?;
    }
}

/// Check, report, then pause before the next domain.
async fn process_domain(
    checker: &DomainChecker<ui::TerminalPrompt>,
    domain: &str,
    args: &Args,
) -> Result<(), Failure> {
    let result = checker
        .check_domain(domain)
        .await
        .map_err(|e| Failure::new(domain, e))?;

    ui::print_result(&result, chrono::Utc::now(), args.json).map_err(|e| {
        Failure::new(
            domain,
            CheckError::internal(format!("Failed to encode JSON: {}", e)),
        )
    })?;

    tokio::time::sleep(checker.config().politeness).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_args() -> Args {
        Args {
            domains: vec![],
            interactive: false,
            json: false,
            base_url: None,
            timeout: None,
            delay: None,
            expiration_offset: None,
            verbose: false,
        }
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("5s"), Ok(Duration::from_secs(5)));
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("3"), Ok(Duration::from_secs(3)));
        assert_eq!(parse_duration(" 1S "), Ok(Duration::from_secs(1)));
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(&create_test_args());
        let defaults = CheckConfig::default();

        assert_eq!(config.base_url, defaults.base_url);
        assert_eq!(config.timeout, defaults.timeout);
        assert_eq!(config.politeness, Duration::from_secs(1));
        assert_eq!(config.layout, defaults.layout);
    }

    #[test]
    fn test_build_config_cli_overrides() {
        let mut args = create_test_args();
        args.base_url = Some("http://127.0.0.1:1234/domain/".to_string());
        args.timeout = Some(Duration::from_secs(2));
        args.delay = Some(Duration::ZERO);
        args.expiration_offset = Some(40);

        let config = build_config(&args);
        assert_eq!(config.base_url, "http://127.0.0.1:1234/domain/");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.politeness, Duration::ZERO);
        assert_eq!(config.layout.expiration_offset, 40);
        assert_eq!(config.layout.expiration_length, 10);
    }

    #[test]
    fn test_validate_args() {
        assert!(validate_args(&create_test_args()).is_ok());

        let mut args = create_test_args();
        args.base_url = Some("ftp://example.org/".to_string());
        assert!(validate_args(&args).is_err());

        let mut args = create_test_args();
        args.timeout = Some(Duration::ZERO);
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_interactive_conflicts_with_domains() {
        assert!(Args::try_parse_from(["cznic-check", "-i", "nic.cz"]).is_err());

        let args = Args::try_parse_from(["cznic-check", "-i"]).unwrap();
        assert!(args.interactive);
        assert!(args.domains.is_empty());

        let args = Args::try_parse_from(["cznic-check", "nic", "example.cz"]).unwrap();
        assert!(!args.interactive);
        assert_eq!(args.domains, vec!["nic", "example.cz"]);
    }

    #[test]
    fn test_duration_flags_parse() {
        let args =
            Args::try_parse_from(["cznic-check", "--delay", "0s", "--timeout", "750ms", "nic"])
                .unwrap();
        assert_eq!(args.delay, Some(Duration::ZERO));
        assert_eq!(args.timeout, Some(Duration::from_millis(750)));
    }
}
