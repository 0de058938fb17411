//! Terminal interaction for the cznic-check CLI.
//!
//! Result lines are plain `domain<TAB>status` text on stdout so they stay
//! easy to pipe; styling is only used for prompts and failure hints.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use console::style;
use cznic_check_lib::{
    format_line, CaptchaPrompt, CheckError, CheckResult, DomainStatus, StatusReport,
};
use std::io::{self, Write};

/// Asks the user to solve the captcha in a browser and waits for enter.
pub struct TerminalPrompt;

#[async_trait]
impl CaptchaPrompt for TerminalPrompt {
    async fn wait_for_user(&self, query_url: &str) -> Result<(), CheckError> {
        println!(
            "Go to {} and check the captcha.",
            style(query_url).cyan().underlined()
        );
        print!("Press enter to continue.");
        io::stdout().flush()?;

        match read_line()? {
            Some(_) => Ok(()),
            None => Err(CheckError::internal(
                "Standard input closed while waiting for the captcha",
            )),
        }
    }
}

/// Prompt for the next domain. `None` means stdin is closed.
pub fn read_domain() -> io::Result<Option<String>> {
    print!("\nEnter domain: ");
    io::stdout().flush()?;
    read_line()
}

fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

/// Print one checked domain, as text or as a JSON line.
pub fn print_result(
    result: &CheckResult,
    now: DateTime<Utc>,
    json: bool,
) -> Result<(), serde_json::Error> {
    let status = DomainStatus::from_result(result, now);
    tracing::info!(domain = %result.domain, status = %status, "domain checked");

    if json {
        let line = serde_json::to_string(&StatusReport::new(result, now))?;
        println!("{}", line);
    } else {
        println!("{}", format_line(result, now));
    }

    Ok(())
}

/// Print the domain that stopped the run and why.
pub fn print_failure(input: &str, error: &CheckError) {
    eprintln!("{}\t{}", input, error);

    if error.is_page_mismatch() {
        eprintln!(
            "{} the lookup page layout may have changed; try --expiration-offset",
            style("hint:").yellow().bold()
        );
    }
}
