// src/ledger/systems/io/load.rs
use bevy::prelude::*;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use super::error::PersistenceError;
use crate::ledger::{
    events::LedgerOperationFeedback,
    page::LedgerBook,
    resources::{LedgerStoragePath, PageRegistry},
};

/// Reads and sanitizes the snapshot. A missing file yields the default
/// one-page book.
pub fn load_book(path: &Path) -> Result<LedgerBook, PersistenceError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No ledger snapshot at {:?}. Starting with a default book.", path);
            return Ok(LedgerBook::default());
        }
        Err(e) => return Err(PersistenceError::io("open", path)(e)),
    };
    let mut book: LedgerBook =
        serde_json::from_reader(BufReader::new(file)).map_err(PersistenceError::json(path))?;

    let fixes = book.sanitize();
    if fixes > 0 {
        warn!("Ledger snapshot {:?} needed {} repair(s) while loading.", path, fixes);
    }
    trace!("Loaded {} page(s) from {:?}.", book.pages.len(), path);
    Ok(book)
}

/// Startup system filling the registry from disk.
pub fn load_ledger_on_startup(
    storage: Res<LedgerStoragePath>,
    mut registry: ResMut<PageRegistry>,
    mut feedback_writer: EventWriter<LedgerOperationFeedback>,
) {
    let path = &storage.0;
    match load_book(path) {
        Ok(book) => {
            info!("Ledger loaded: {} page(s).", book.pages.len());
            *registry = PageRegistry::from_book(book);
        }
        Err(e) => {
            error!("Failed to load ledger snapshot: {}", e);
            if e.is_corrupt_snapshot() {
                let backup = path.with_extension("json.corrupt");
                match fs::rename(path, &backup) {
                    Ok(()) => warn!("Moved unreadable snapshot to {:?}.", backup),
                    Err(rename_err) => error!("Could not move unreadable snapshot aside: {}", rename_err),
                }
            }
            feedback_writer.write(LedgerOperationFeedback::error(format!(
                "Could not load saved ledger ({}). Started with a new book.",
                e
            )));
        }
    }
}
