// src/cli/mod.rs
// Command-line tools that read the ledger snapshot without starting the GUI.

pub mod list_pages;
pub mod show_page;
pub mod totals;

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

use crate::ledger::{error::LedgerError, page::LedgerPage, systems::io::PersistenceError};

#[derive(Parser)]
#[command(name = "ledgerbook")]
#[command(about = "Ledgerbook - tabbed ledger editor with snapshot tools", long_about = None)]
pub struct Cli {
    /// Directory holding ledger_book.json (overrides the settings file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every page with its column and row counts
    ListPages,

    /// Print a page as a text table
    ShowPage {
        /// Id of the page (see list-pages)
        page_id: String,
        /// Only rows containing this text in any field
        #[arg(long)]
        search: Option<String>,
    },

    /// Print the sum of every number column of a page
    Totals {
        /// Id of the page (see list-pages)
        page_id: String,
        /// Only rows containing this text in any field
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub fn run(command: &Commands, snapshot: &std::path::Path, out: &mut impl Write) -> Result<(), CliError> {
    let book = crate::ledger::systems::io::load_book(snapshot)?;
    match command {
        Commands::ListPages => list_pages::run(&book, out),
        Commands::ShowPage { page_id, search } => {
            show_page::run(find_page(&book.pages, page_id)?, search.as_deref().unwrap_or(""), out)
        }
        Commands::Totals { page_id, search } => {
            totals::run(find_page(&book.pages, page_id)?, search.as_deref().unwrap_or(""), out)
        }
    }
}

fn find_page<'a>(pages: &'a [LedgerPage], page_id: &str) -> Result<&'a LedgerPage, LedgerError> {
    pages
        .iter()
        .find(|p| p.id == page_id)
        .ok_or_else(|| LedgerError::UnknownPage(page_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn data_dir_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["ledgerbook", "totals", "rent-1", "--data-dir", "/tmp/books"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/books")));
        assert!(matches!(cli.command, Some(Commands::Totals { .. })));
    }

    #[test]
    fn unknown_page_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let result = run(
            &Commands::Totals {
                page_id: "nope".into(),
                search: None,
            },
            &dir.path().join("ledger_book.json"),
            &mut out,
        );
        assert!(matches!(result, Err(CliError::Ledger(LedgerError::UnknownPage(_)))));
    }
}
