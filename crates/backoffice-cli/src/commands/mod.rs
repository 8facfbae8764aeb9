//! CLI command implementations.

pub mod coerce;
pub mod create;
pub mod delete;
pub mod login;
pub mod logout;
pub mod show;
pub mod stats;
pub mod status;
pub mod tables;
pub mod update;

use backoffice::record::CoercedRecord;
use backoffice::{AdminBackend, ApiClient, ClientConfig, MockBackend, RawRecord, TableEditor};
use colored::Colorize;
use tracing::debug;

use crate::cli::Cli;

/// Settings shared by every command, resolved from env and global flags.
pub struct Context {
    pub config: ClientConfig,
    pub mock: bool,
    pub verbose: bool,
}

impl Context {
    /// Environment defaults, overridden by `--api-url` and `--session-file`.
    pub fn from_cli(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &cli.api_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(path) = &cli.session_file {
            config = config.with_session_file(path.clone());
        }
        debug!(base_url = %config.base_url, mock = cli.mock, "resolved configuration");

        Ok(Self {
            config,
            mock: cli.mock,
            verbose: cli.verbose,
        })
    }

    /// HTTP client with the persisted session.
    pub fn client(&self) -> Result<ApiClient, Box<dyn std::error::Error>> {
        Ok(ApiClient::from_config(self.config.clone())?)
    }

    /// The backend data commands run against: the API, or the demo dataset
    /// with `--mock`.
    pub fn backend(&self) -> Result<Box<dyn AdminBackend>, Box<dyn std::error::Error>> {
        if self.mock {
            return Ok(Box::new(MockBackend::demo()));
        }
        Ok(Box::new(self.client()?))
    }
}

/// Select `table`, failing with the editor's message if it could not load.
pub fn open_table<'a, B: AdminBackend + ?Sized>(
    backend: &'a B,
    table: &str,
) -> Result<TableEditor<'a, B>, Box<dyn std::error::Error>> {
    let mut editor = TableEditor::new(backend);
    editor.select(table)?;
    if let Some(message) = editor.error() {
        return Err(message.to_string().into());
    }
    Ok(editor)
}

/// Overlay `--set` assignments onto a form, in the order given.
pub fn apply_fields(mut form: RawRecord, fields: Vec<(String, String)>) -> RawRecord {
    for (name, value) in fields {
        form.insert(name, value);
    }
    form
}

/// Print a coerced record as it goes over the wire.
pub fn print_record(record: &CoercedRecord) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

/// Note printed by commands that have nothing to do against the demo data.
pub fn print_mock_note(what: &str) {
    println!(
        "{} {} has no effect with {}.",
        "Note:".yellow(),
        what,
        "--mock".cyan()
    );
}
