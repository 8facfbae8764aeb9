//! Delete command - remove a row.

use colored::Colorize;

use backoffice::TableEditor;

use super::Context;

pub fn run(
    ctx: &Context,
    table: String,
    id: i64,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err(format!(
            "Refusing to delete row {} from {} without --yes",
            id, table
        )
        .into());
    }

    let backend = ctx.backend()?;
    let mut editor = TableEditor::new(backend.as_ref());
    editor.select(&table)?;
    editor.delete(id)?;

    println!(
        "{} Deleted row {} from {}",
        "✓".green().bold(),
        id.to_string().white().bold(),
        table.cyan().bold()
    );
    Ok(())
}
