// src/ledger/systems/logic/add_entry.rs
use bevy::prelude::*;

use crate::ledger::{
    events::{AddEntryRequest, LedgerOperationFeedback, PageDataModifiedEvent},
    resources::PageRegistry,
};

pub fn handle_add_entry_request(
    mut events: EventReader<AddEntryRequest>,
    mut registry: ResMut<PageRegistry>,
    mut feedback_writer: EventWriter<LedgerOperationFeedback>,
    mut modified_writer: EventWriter<PageDataModifiedEvent>,
) {
    for event in events.read() {
        match registry.table_mut(&event.page_id) {
            Some(table) => {
                let entry_id = table.add_entry();
                debug!("Added row {} to page '{}'.", entry_id, event.page_id);
                modified_writer.write(PageDataModifiedEvent {
                    page_id: event.page_id.clone(),
                });
            }
            None => {
                warn!("Add row ignored: page '{}' not found.", event.page_id);
                feedback_writer.write(LedgerOperationFeedback::error(format!(
                    "Add row failed: page '{}' not found.",
                    event.page_id
                )));
            }
        }
    }
}
