//! Login command - exchange credentials for a session token.

use colored::Colorize;

use super::Context;

pub fn run(
    ctx: &Context,
    username: String,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if ctx.mock {
        super::print_mock_note("login");
        return Ok(());
    }

    let password = password
        .ok_or("Password required: pass --password or set BACKOFFICE_PASSWORD")?;

    let client = ctx.client()?;
    client.login(&username, &password)?;

    println!(
        "{} Logged in as {}",
        "✓".green().bold(),
        username.white().bold()
    );
    if ctx.verbose {
        println!(
            "Session stored in {}",
            client.config().session_file.display().to_string().cyan()
        );
    }

    Ok(())
}
