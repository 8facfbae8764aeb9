//! Backoffice CLI - operator tool for the shop admin API.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;

use backoffice::BackofficeError;
use commands::Context;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = Context::from_cli(&cli).and_then(|ctx| run(&ctx, cli.command));

    if let Err(e) = result {
        let unauthorized = e
            .downcast_ref::<BackofficeError>()
            .is_some_and(BackofficeError::is_unauthorized);
        if unauthorized {
            eprintln!(
                "{} Run {}",
                "Session expired.".yellow().bold(),
                "`backoffice login`".cyan()
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn run(ctx: &Context, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Login { username, password } => commands::login::run(ctx, username, password),

        Commands::Logout => commands::logout::run(ctx),

        Commands::Status { json } => commands::status::run(ctx, json),

        Commands::Stats {
            period,
            limit,
            json,
        } => commands::stats::run(ctx, period, limit, json),

        Commands::Tables => commands::tables::run(ctx),

        Commands::Show { table, json } => commands::show::run(ctx, table, json),

        Commands::Create { table, fields } => commands::create::run(ctx, table, fields),

        Commands::Update {
            table,
            id,
            fields,
            reparse_timestamps,
        } => commands::update::run(ctx, table, id, fields, reparse_timestamps),

        Commands::Delete { table, id, yes } => commands::delete::run(ctx, table, id, yes),

        Commands::Coerce {
            fields,
            update,
            reparse_timestamps,
        } => commands::coerce::run(fields, update, reparse_timestamps),
    }
}
