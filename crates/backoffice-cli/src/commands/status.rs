//! Status command - show whether a session is active.

use colored::Colorize;
use serde::Serialize;

use super::Context;

#[derive(Serialize)]
struct StatusReport {
    authenticated: bool,
    api_url: String,
    session_file: String,
    timeout_secs: u64,
    mock: bool,
}

pub fn run(ctx: &Context, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let client = ctx.client()?;
    let report = StatusReport {
        authenticated: ctx.mock || client.session().is_authenticated(),
        api_url: ctx.config.base_url.clone(),
        session_file: ctx.config.session_file.display().to_string(),
        timeout_secs: ctx.config.timeout.as_secs(),
        mock: ctx.mock,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Backoffice status".cyan().bold());
    println!();
    if ctx.mock {
        println!("  Backend:  {}", "demo data (--mock)".magenta());
    } else {
        println!("  API:      {}", report.api_url.white());
    }
    println!("  Session:  {}", report.session_file.white());
    println!("  Timeout:  {}s", report.timeout_secs);
    if report.authenticated {
        println!("  Status:   {}", "logged in".green().bold());
    } else {
        println!("  Status:   {}", "logged out".red().bold());
        println!();
        println!("Run {} to start a session.", "backoffice login -u <user>".cyan().bold());
    }

    Ok(())
}
