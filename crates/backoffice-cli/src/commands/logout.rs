//! Logout command - discard the stored session token.

use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    if ctx.mock {
        super::print_mock_note("logout");
        return Ok(());
    }

    let client = ctx.client()?;
    if !client.session().is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    client.logout()?;
    println!("{} Logged out", "✓".green().bold());
    Ok(())
}
