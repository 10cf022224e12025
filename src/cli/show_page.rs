// src/cli/show_page.rs
use std::io::Write;

use super::CliError;
use crate::ledger::{cell_input::display_value, filter::visible_entries, page::LedgerPage};

/// Prints the page as an aligned text table. The S.No column numbers the
/// printed rows.
pub fn run(page: &LedgerPage, search: &str, out: &mut impl Write) -> Result<(), CliError> {
    let table = &page.table;
    let columns: Vec<_> = table
        .columns()
        .iter()
        .filter(|c| c.is_serial() || c.holds_values())
        .collect();
    let entries = visible_entries(table.entries(), table.columns(), search, &[]);

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(entries.len() + 1);
    grid.push(columns.iter().map(|c| c.name.clone()).collect());
    for (index, entry) in entries.iter().enumerate() {
        grid.push(
            columns
                .iter()
                .map(|c| {
                    if c.is_serial() {
                        (index + 1).to_string()
                    } else {
                        display_value(c.column_type, entry.value(&c.id))
                    }
                })
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| grid.iter().map(|row| row[i].chars().count()).max().unwrap_or(0))
        .collect();

    writeln!(out, "{}", page.name)?;
    for (row_index, row) in grid.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        writeln!(out, "{}", line.join(" | ").trim_end())?;
        if row_index == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            writeln!(out, "{}", rule.join("-+-"))?;
        }
    }
    if entries.len() != table.entries().len() {
        writeln!(out, "({} of {} rows match '{}')", entries.len(), table.entries().len(), search)?;
    }
    Ok(())
}
