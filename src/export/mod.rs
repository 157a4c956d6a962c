use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Expense;

/// CSV column order; the header row always comes first and every value is
/// quoted.
const CSV_HEADER: [&str; 7] = ["id", "amount", "currency", "category", "desc", "date", "created"];

pub(crate) fn write_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;
    for e in expenses {
        wtr.write_record([
            e.id.as_str(),
            &e.amount.to_string(),
            e.currency.as_str(),
            e.category.as_str(),
            e.description.as_str(),
            e.date.as_str(),
            e.created_at.as_str(),
        ])
        .context("Failed to write CSV row")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Export to a CSV file, returning the number of rows written.
pub(crate) fn export_csv(path: &Path, expenses: &[Expense]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(file, expenses)?;
    Ok(expenses.len())
}

/// Full-state JSON export: the entire expenses record, verbatim.
pub(crate) fn export_json(path: &Path, expenses: &[Expense]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &serde_json::json!({ "expenses": expenses }))
        .context("Failed to write JSON export")?;
    Ok(())
}

#[cfg(test)]
mod tests;
