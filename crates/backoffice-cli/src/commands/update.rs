//! Update command - edit fields of an existing row.

use colored::Colorize;

use backoffice::record::{Coercer, UpdateTimestamps};

use super::{Context, apply_fields, open_table, print_record};

pub fn run(
    ctx: &Context,
    table: String,
    id: i64,
    fields: Vec<(String, String)>,
    reparse_timestamps: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if fields.is_empty() {
        return Err("Nothing to update: pass at least one --set FIELD=VALUE".into());
    }

    let backend = ctx.backend()?;
    let policy = if reparse_timestamps {
        UpdateTimestamps::Reparse
    } else {
        UpdateTimestamps::PassThrough
    };
    let mut editor = open_table(backend.as_ref(), &table)?
        .with_coercer(Coercer::new().with_update_timestamps(policy));

    // Untouched fields are resent as they are, like the edit dialog does.
    let form = apply_fields(editor.edit_form(id)?, fields);
    let record = editor.update(id, &form)?;

    println!(
        "{} Updated row {} in {}",
        "✓".green().bold(),
        id.to_string().white().bold(),
        table.cyan().bold()
    );
    if ctx.verbose {
        print_record(&record)?;
    }
    Ok(())
}
