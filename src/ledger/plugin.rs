// src/ledger/plugin.rs
use bevy::prelude::*;

use super::events::{
    AddEntryRequest, GridInputEvent, LedgerOperationFeedback, PageDataModifiedEvent, RequestAddColumn,
    RequestCreatePage, RequestDeleteEntries, RequestDeletePage, RequestRenamePage, RequestSaveLedger,
    RequestSetActivePage,
};
use super::grid_edit::GridEditor;
use super::resources::{LedgerStoragePath, PageRegistry, ViewCriteria, VisibleEntries};
use super::systems;
use crate::settings::AppSettings;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LedgerSystemSet {
    /// Page-level requests: create, rename, delete, activate.
    PageRequests,
    /// Table mutations and the derived view.
    ApplyChanges,
    FileOperations,
}

/// Owns the ledger data, its mutation systems and persistence.
pub struct LedgerPlugin;

impl Plugin for LedgerPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                LedgerSystemSet::PageRequests,
                LedgerSystemSet::ApplyChanges.after(LedgerSystemSet::PageRequests),
                LedgerSystemSet::FileOperations.after(LedgerSystemSet::ApplyChanges),
            ),
        );

        if !app.world().contains_resource::<AppSettings>() {
            app.init_resource::<AppSettings>();
        }
        if !app.world().contains_resource::<LedgerStoragePath>() {
            let settings = app.world().resource::<AppSettings>();
            let path = systems::io::snapshot_path(&systems::io::resolve_data_dir(settings));
            app.insert_resource(LedgerStoragePath(path));
        }

        app.init_resource::<PageRegistry>()
            .init_resource::<GridEditor>()
            .init_resource::<ViewCriteria>()
            .init_resource::<VisibleEntries>();

        app.add_event::<RequestCreatePage>()
            .add_event::<RequestRenamePage>()
            .add_event::<RequestDeletePage>()
            .add_event::<RequestSetActivePage>()
            .add_event::<RequestAddColumn>()
            .add_event::<AddEntryRequest>()
            .add_event::<RequestDeleteEntries>()
            .add_event::<GridInputEvent>()
            .add_event::<LedgerOperationFeedback>()
            .add_event::<PageDataModifiedEvent>()
            .add_event::<RequestSaveLedger>();

        app.add_systems(Startup, systems::io::load_ledger_on_startup);

        app.add_systems(
            Update,
            (
                systems::logic::handle_create_page_request,
                systems::logic::handle_rename_page_request,
                systems::logic::handle_delete_page_request,
                systems::logic::handle_set_active_page_request,
            )
                .chain()
                .in_set(LedgerSystemSet::PageRequests),
        );
        app.add_systems(
            Update,
            (
                systems::logic::handle_add_column_request,
                systems::logic::handle_add_entry_request,
                systems::logic::handle_delete_entries_request,
                systems::logic::handle_grid_input,
                systems::logic::refresh_visible_entries,
            )
                .chain()
                .in_set(LedgerSystemSet::ApplyChanges),
        );
        app.add_systems(
            Update,
            systems::io::handle_save_on_modification.in_set(LedgerSystemSet::FileOperations),
        );

        info!("LedgerPlugin initialized.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::column_type::ColumnType;
    use crate::ledger::table::ColumnPosition;
    use tempfile::tempdir;

    #[test]
    fn plugin_loads_mutates_and_saves() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger_book.json");

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(LedgerStoragePath(path.clone()))
            .add_plugins(LedgerPlugin);
        app.update();
        assert_eq!(app.world().resource::<VisibleEntries>().rows.len(), 10);

        let page_id = app.world().resource::<PageRegistry>().active_page_id().to_string();
        app.world_mut().send_event(RequestAddColumn {
            page_id: page_id.clone(),
            position: ColumnPosition::End,
            name: Some("Qty".into()),
            column_type: ColumnType::Number,
        });
        app.update();

        assert_eq!(app.world().resource::<VisibleEntries>().totals.len(), 2);
        let saved = systems::io::load_book(&path).unwrap();
        assert_eq!(saved.pages[0].table.columns().len(), 4);
    }
}
