//! Create command - type the given fields and insert a row.

use colored::Colorize;
use tracing::warn;

use backoffice::{RawRecord, TableEditor};

use super::{Context, print_record};

pub fn run(
    ctx: &Context,
    table: String,
    fields: Vec<(String, String)>,
) -> Result<(), Box<dyn std::error::Error>> {
    if fields.is_empty() {
        return Err("Nothing to create: pass at least one --set FIELD=VALUE".into());
    }

    let backend = ctx.backend()?;
    let mut editor = TableEditor::new(backend.as_ref());
    editor.select(&table)?;

    // Only the given fields are sent; the server fills in the rest.
    if let Some(message) = editor.error() {
        warn!(table = %table, "{}", message);
    } else if let Some(data) = editor.data() {
        for (name, _) in fields.iter().filter(|(name, _)| !data.columns.contains(name)) {
            warn!(table = %table, field = %name, "field is not a column of this table");
        }
    }

    let form: RawRecord = fields.into_iter().collect();
    let record = editor.create(&form)?;

    println!(
        "{} Created row in {}",
        "✓".green().bold(),
        table.cyan().bold()
    );
    if ctx.verbose {
        print_record(&record)?;
    }
    Ok(())
}
