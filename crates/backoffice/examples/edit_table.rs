//! Example: Edit a table against the in-memory demo backend.
//!
//! Usage:
//!   cargo run --example edit_table -- [table]
//!
//! Example:
//!   cargo run --example edit_table -- products

use std::env;

use backoffice::{MockBackend, RawRecord, TableEditor};

fn main() -> backoffice::Result<()> {
    let table = env::args().nth(1).unwrap_or_else(|| "products".to_string());

    let backend = MockBackend::demo();
    let mut editor = TableEditor::new(&backend);
    editor.load_tables()?;
    println!("Tables: {}", editor.tables().join(", "));

    editor.select(&table)?;
    if let Some(message) = editor.error() {
        eprintln!("{}", message);
        std::process::exit(1);
    }

    println!("\nWritable fields of '{}':", table);
    for (column, hint) in editor.form_fields() {
        println!("  {:<14} {:?} ({})", column, hint.kind, hint.placeholder);
    }

    // Fill every writable field with a sample value
    let mut form = RawRecord::new();
    for (column, _) in editor.form_fields() {
        let value = match column.as_str() {
            "price" => "3.75",
            "stock" => "40",
            "isActive" => "true",
            "birthday" => "1990-05-17",
            _ => "sample",
        };
        form.insert(column, value);
    }

    let record = editor.create(&form)?;
    println!("\nSent: {}", serde_json::to_string(&record)?);

    if let Some(data) = editor.data() {
        println!("\n{} now has {} rows:", table, data.rows.len());
        for row in &data.rows {
            let raw = RawRecord::from_row(row);
            let cells: Vec<String> = raw.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            println!("  {}", cells.join("  "));
        }
    }

    Ok(())
}
