// src/ledger/systems/logic/delete_entries.rs
use bevy::prelude::*;

use crate::ledger::{
    events::{LedgerOperationFeedback, PageDataModifiedEvent, RequestDeleteEntries},
    resources::PageRegistry,
};

/// Deletes rows in place. Missing ids are skipped; the rest still go.
pub fn handle_delete_entries_request(
    mut events: EventReader<RequestDeleteEntries>,
    mut registry: ResMut<PageRegistry>,
    mut feedback_writer: EventWriter<LedgerOperationFeedback>,
    mut modified_writer: EventWriter<PageDataModifiedEvent>,
) {
    for event in events.read() {
        let Some(table) = registry.table_mut(&event.page_id) else {
            feedback_writer.write(LedgerOperationFeedback::error(format!(
                "Delete rows failed: page '{}' not found.",
                event.page_id
            )));
            continue;
        };

        let mut deleted = 0;
        for entry_id in &event.entry_ids {
            match table.delete_entry(*entry_id) {
                Ok(_) => deleted += 1,
                Err(e) => debug!("Skipping row delete on '{}': {}", event.page_id, e),
            }
        }

        if deleted > 0 {
            info!("Deleted {} row(s) from page '{}'.", deleted, event.page_id);
            feedback_writer.write(LedgerOperationFeedback::info(format!("Deleted {} row(s).", deleted)));
            modified_writer.write(PageDataModifiedEvent {
                page_id: event.page_id.clone(),
            });
        }
    }
}
