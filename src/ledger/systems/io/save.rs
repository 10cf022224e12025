// src/ledger/systems/io/save.rs
use bevy::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::error::PersistenceError;
use crate::ledger::{
    events::{LedgerOperationFeedback, PageDataModifiedEvent, RequestSaveLedger},
    page::LedgerBook,
    resources::{LedgerStoragePath, PageRegistry},
};
use crate::settings::AppSettings;

/// Writes the snapshot through a temp file and a rename. The target is
/// either the previous snapshot or the complete new one.
pub fn write_book_atomic(book: &LedgerBook, path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(PersistenceError::io("create directory", parent))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path).map_err(PersistenceError::io("create", &temp_path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, book).map_err(PersistenceError::json(&temp_path))?;
    writer.flush().map_err(PersistenceError::io("write", &temp_path))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(PersistenceError::io("sync", &temp_path))?;
    drop(writer);

    fs::rename(&temp_path, path).map_err(PersistenceError::io("rename", path))?;
    trace!("Ledger snapshot written to {:?}.", path);
    Ok(())
}

/// Saves at most once per frame: after modifications when autosave is on,
/// or whenever a save was requested.
pub fn handle_save_on_modification(
    mut events: EventReader<PageDataModifiedEvent>,
    mut save_requests: EventReader<RequestSaveLedger>,
    registry: Res<PageRegistry>,
    storage: Res<LedgerStoragePath>,
    settings: Res<AppSettings>,
    mut feedback_writer: EventWriter<LedgerOperationFeedback>,
) {
    if events.is_empty() && save_requests.is_empty() {
        return;
    }
    let modified = events.read().count();
    let requested = save_requests.read().count() > 0;
    if !settings.autosave && !requested {
        trace!("Autosave disabled; skipping save for {} modification(s).", modified);
        return;
    }

    debug!("Saving ledger ({} modification event(s), requested: {}).", modified, requested);
    match write_book_atomic(&registry.to_book(), &storage.0) {
        Ok(()) if requested => {
            info!("Ledger saved to {:?}.", storage.0);
            feedback_writer.write(LedgerOperationFeedback::info("Ledger saved."));
        }
        Ok(()) => {}
        Err(e) => {
            error!("Failed to save ledger: {}", e);
            feedback_writer.write(LedgerOperationFeedback::error(format!("Save failed: {}", e)));
        }
    }
}
