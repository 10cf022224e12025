// src/ledger/systems/logic/pages.rs
use bevy::prelude::*;

use crate::ledger::{
    events::{
        LedgerOperationFeedback, PageDataModifiedEvent, RequestCreatePage, RequestDeletePage,
        RequestRenamePage, RequestSetActivePage,
    },
    grid_edit::GridEditor,
    resources::{PageRegistry, ViewCriteria},
};

/// Commits any open edit on the page being left and clears the view
/// criteria, which belong to that page.
fn leave_active_page(
    registry: &mut PageRegistry,
    editor: &mut GridEditor,
    criteria: &mut ViewCriteria,
    modified_writer: &mut EventWriter<PageDataModifiedEvent>,
) {
    let leaving = registry.active_page_id().to_string();
    if !editor.state().is_idle() {
        if let Some(table) = registry.table_mut(&leaving) {
            let outcome = editor.commit_and_close(table);
            if !outcome.changes.is_empty() {
                modified_writer.write(PageDataModifiedEvent { page_id: leaving.clone() });
            }
            for error in outcome.rejected {
                warn!("Pending edit on '{}' was not committed: {}", leaving, error);
            }
        }
    }
    if criteria.is_filtering() {
        criteria.clear();
    }
}

pub fn handle_create_page_request(
    mut events: EventReader<RequestCreatePage>,
    mut registry: ResMut<PageRegistry>,
    mut editor: ResMut<GridEditor>,
    mut criteria: ResMut<ViewCriteria>,
    mut feedback_writer: EventWriter<LedgerOperationFeedback>,
    mut modified_writer: EventWriter<PageDataModifiedEvent>,
) {
    for event in events.read() {
        if event.name.trim().is_empty() {
            feedback_writer.write(LedgerOperationFeedback::error("Create failed: Page name cannot be empty."));
            continue;
        }
        leave_active_page(&mut registry, &mut editor, &mut criteria, &mut modified_writer);
        match registry.create_page(&event.name) {
            Ok(page_id) => {
                info!("Created page '{}' ({}).", event.name.trim(), page_id);
                feedback_writer.write(LedgerOperationFeedback::info(format!(
                    "Created page '{}'.",
                    event.name.trim()
                )));
                modified_writer.write(PageDataModifiedEvent { page_id });
            }
            Err(e) => {
                warn!("Create page failed: {}", e);
                feedback_writer.write(LedgerOperationFeedback::error(format!("Create failed: {}", e)));
            }
        }
    }
}

pub fn handle_rename_page_request(
    mut events: EventReader<RequestRenamePage>,
    mut registry: ResMut<PageRegistry>,
    mut feedback_writer: EventWriter<LedgerOperationFeedback>,
    mut modified_writer: EventWriter<PageDataModifiedEvent>,
) {
    for event in events.read() {
        match registry.rename_page(&event.page_id, &event.new_name) {
            Ok(old_name) => {
                let new_name = event.new_name.trim();
                info!("Renamed page '{}' -> '{}'.", old_name, new_name);
                feedback_writer.write(LedgerOperationFeedback::info(format!(
                    "Renamed page '{}' to '{}'.",
                    old_name, new_name
                )));
                modified_writer.write(PageDataModifiedEvent {
                    page_id: event.page_id.clone(),
                });
            }
            Err(e) => {
                warn!("Rename of page '{}' failed: {}", event.page_id, e);
                feedback_writer.write(LedgerOperationFeedback::error(format!("Rename failed: {}", e)));
            }
        }
    }
}

pub fn handle_delete_page_request(
    mut events: EventReader<RequestDeletePage>,
    mut registry: ResMut<PageRegistry>,
    mut editor: ResMut<GridEditor>,
    mut criteria: ResMut<ViewCriteria>,
    mut feedback_writer: EventWriter<LedgerOperationFeedback>,
    mut modified_writer: EventWriter<PageDataModifiedEvent>,
) {
    for event in events.read() {
        let deleting_active = registry.active_page_id() == event.page_id;
        if deleting_active && registry.pages().len() > 1 {
            // The pending edit belongs to the page going away.
            editor.cancel();
            if criteria.is_filtering() {
                criteria.clear();
            }
        }
        match registry.delete_page(&event.page_id) {
            Ok(removed) => {
                info!("Deleted page '{}' ({}).", removed.name, removed.id);
                feedback_writer.write(LedgerOperationFeedback::info(format!("Deleted page '{}'.", removed.name)));
                modified_writer.write(PageDataModifiedEvent {
                    page_id: event.page_id.clone(),
                });
            }
            Err(e) => {
                warn!("Delete of page '{}' failed: {}", event.page_id, e);
                feedback_writer.write(LedgerOperationFeedback::error(format!("Delete failed: {}", e)));
            }
        }
    }
}

pub fn handle_set_active_page_request(
    mut events: EventReader<RequestSetActivePage>,
    mut registry: ResMut<PageRegistry>,
    mut editor: ResMut<GridEditor>,
    mut criteria: ResMut<ViewCriteria>,
    mut modified_writer: EventWriter<PageDataModifiedEvent>,
) {
    for event in events.read() {
        if registry.page(&event.page_id).is_none() {
            debug!("Ignoring activation of unknown page '{}'.", event.page_id);
            continue;
        }
        if registry.active_page_id() == event.page_id {
            continue;
        }
        leave_active_page(&mut registry, &mut editor, &mut criteria, &mut modified_writer);
        if let Ok(true) = registry.set_active_page(&event.page_id) {
            info!("Active page is now '{}'.", event.page_id);
            modified_writer.write(PageDataModifiedEvent {
                page_id: event.page_id.clone(),
            });
        }
    }
}
