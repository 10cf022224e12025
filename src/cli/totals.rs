// src/cli/totals.rs
use std::io::Write;

use super::CliError;
use crate::ledger::{
    filter::visible_entries,
    footer::{column_totals, format_total},
    page::LedgerPage,
};

pub fn run(page: &LedgerPage, search: &str, out: &mut impl Write) -> Result<(), CliError> {
    let table = &page.table;
    let entries = visible_entries(table.entries(), table.columns(), search, &[]);
    let totals = column_totals(table.columns(), entries.iter().copied());
    if totals.is_empty() {
        writeln!(out, "Page '{}' has no number columns.", page.name)?;
        return Ok(());
    }
    for total in totals {
        writeln!(out, "{} = {}", total.name, format_total(total.total))?;
    }
    Ok(())
}
