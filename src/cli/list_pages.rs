// src/cli/list_pages.rs
use std::io::Write;

use super::CliError;
use crate::ledger::page::LedgerBook;

pub fn run(book: &LedgerBook, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "  {:<30} {:<24} {:>7} {:>7}", "Id", "Name", "Columns", "Rows")?;
    writeln!(out, "{}", "-".repeat(72))?;
    for page in &book.pages {
        let marker = if page.id == book.active_page_id { '*' } else { ' ' };
        writeln!(
            out,
            "{} {:<30} {:<24} {:>7} {:>7}",
            marker,
            page.id,
            page.name,
            page.table.columns().len(),
            page.table.entries().len()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_page_is_starred() {
        let book = LedgerBook::default();
        let mut out = Vec::new();
        run(&book, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let line = text.lines().nth(2).unwrap();
        assert!(line.starts_with("* "));
        assert!(line.contains("Page 1"));
        assert!(line.trim_end().ends_with("10"));
    }
}
