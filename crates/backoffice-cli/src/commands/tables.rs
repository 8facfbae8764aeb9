//! Tables command - list editable tables.

use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let backend = ctx.backend()?;
    let tables = backend.tables()?;

    if tables.is_empty() {
        println!("No tables available.");
        return Ok(());
    }

    println!(
        "{} {}",
        tables.len().to_string().white().bold(),
        "tables".cyan().bold()
    );
    for table in &tables {
        println!("  {}", table);
    }
    Ok(())
}
