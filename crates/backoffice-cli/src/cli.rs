//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use backoffice::Period;
use backoffice::api::DEFAULT_LIMIT;

/// Backoffice: operator CLI for the shop admin API
#[derive(Parser)]
#[command(name = "backoffice")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the admin API (default: http://localhost:3001/api)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Where the session token is stored
    #[arg(long, global = true, value_name = "FILE")]
    pub session_file: Option<PathBuf>,

    /// Use the built-in demo backend instead of the API
    #[arg(long, global = true)]
    pub mock: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        /// Admin username
        #[arg(short, long)]
        username: String,

        /// Admin password
        #[arg(short, long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Discard the stored session token
    Logout,

    /// Show whether a session is active
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the dashboard: totals, period stats, recent activity
    Stats {
        /// Period for revenue and orders (24h, 7d, 30d)
        #[arg(short, long, default_value = "30d")]
        period: Period,

        /// Number of recent orders, users and popular products
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List editable tables
    Tables,

    /// Show the rows of a table
    Show {
        #[arg(value_name = "TABLE")]
        table: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a row
    Create {
        #[arg(value_name = "TABLE")]
        table: String,

        /// Field value, repeatable (e.g. --set price=19.99)
        #[arg(short = 's', long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },

    /// Edit fields of an existing row
    Update {
        #[arg(value_name = "TABLE")]
        table: String,

        #[arg(value_name = "ID")]
        id: i64,

        /// Field value, repeatable (e.g. --set isActive=false)
        #[arg(short = 's', long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,

        /// Parse edited dates instead of sending them as typed
        #[arg(long)]
        reparse_timestamps: bool,
    },

    /// Delete a row
    Delete {
        #[arg(value_name = "TABLE")]
        table: String,

        #[arg(value_name = "ID")]
        id: i64,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show how field values would be typed, without sending anything
    Coerce {
        /// Field value, repeatable (e.g. --set birthday=1990-05-17)
        #[arg(short = 's', long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,

        /// Apply update rules instead of create rules
        #[arg(long)]
        update: bool,

        /// With --update, parse dates as on create
        #[arg(long, requires = "update")]
        reparse_timestamps: bool,
    },
}

/// Split `FIELD=VALUE` at the first `=`. The value may be empty.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, _)) if field.is_empty() => Err(format!("missing field name in '{}'", s)),
        Some((field, value)) => Ok((field.to_string(), value.to_string())),
        None => Err(format!("expected FIELD=VALUE, got '{}'", s)),
    }
}
