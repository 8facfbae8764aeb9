//! Show command - print the rows of a table.

use colored::Colorize;

use backoffice::RawRecord;

use super::{Context, open_table};

/// Widest a column is allowed to render before values are cut.
const MAX_CELL_WIDTH: usize = 32;

pub fn run(ctx: &Context, table: String, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let backend = ctx.backend()?;
    let editor = open_table(backend.as_ref(), &table)?;
    let Some(data) = editor.data() else {
        return Ok(());
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = data
        .rows
        .iter()
        .map(|row| {
            let raw = RawRecord::from_row(row);
            data.columns
                .iter()
                .map(|column| truncate(raw.get(column).unwrap_or("")))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = data
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|cells| cells[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = data
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{:<width$}", column, width = width))
        .collect();
    println!("{}", header.join("  ").cyan().bold());

    for cells in &rows {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        println!("{}", line.join("  "));
    }

    println!();
    println!(
        "{} rows in {}",
        rows.len().to_string().white().bold(),
        table.cyan()
    );
    Ok(())
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        return value.to_string();
    }
    let cut: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        let long = "x".repeat(40);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), MAX_CELL_WIDTH);
        assert!(cut.ends_with('…'));
    }
}
