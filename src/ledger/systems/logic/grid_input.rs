// src/ledger/systems/logic/grid_input.rs
use bevy::prelude::*;

use super::view::{display_rows, visible_entry_ids};
use crate::ledger::{
    events::{GridInputEvent, LedgerOperationFeedback, PageDataModifiedEvent},
    grid_edit::GridEditor,
    resources::{PageRegistry, ViewCriteria},
    table::TableChange,
};
use crate::settings::AppSettings;

/// Runs grid input on the active page through the edit-state machine and
/// reports what it changed. The registry is only marked changed when an
/// input actually changed the table.
pub fn handle_grid_input(
    mut events: EventReader<GridInputEvent>,
    mut registry: ResMut<PageRegistry>,
    mut editor: ResMut<GridEditor>,
    criteria: Res<ViewCriteria>,
    settings: Res<AppSettings>,
    mut feedback_writer: EventWriter<LedgerOperationFeedback>,
    mut modified_writer: EventWriter<PageDataModifiedEvent>,
) {
    if events.is_empty() {
        return;
    }
    let page_id = registry.active_page_id().to_string();
    let mut page_modified = false;
    let mut table_changed = false;

    for GridInputEvent(input) in events.read() {
        let Some(table) = registry.bypass_change_detection().table_mut(&page_id) else {
            warn!("Grid input ignored: active page '{}' not found.", page_id);
            break;
        };
        let rows = display_rows(&visible_entry_ids(table, &criteria), settings.placeholder_rows);
        let was_resizing = editor.state().resizing_column().is_some();

        trace!("Grid input on '{}': {:?}", page_id, input);
        let mut outcome = editor.handle(table, &rows, input.clone());

        if !outcome.changes.is_empty() {
            let rows_after = display_rows(&visible_entry_ids(table, &criteria), settings.placeholder_rows);
            if let Some((entry_id, _)) = editor.state().editing_cell() {
                if !rows_after.contains(&entry_id) {
                    debug!("Entry {} on '{}' is hidden by the current view; closing its edit.", entry_id, page_id);
                }
            }
            let closed = editor.close_hidden_cell(table, &rows_after);
            outcome.changes.extend(closed.changes);
            outcome.rejected.extend(closed.rejected);
        }
        table_changed |= !outcome.changes.is_empty();

        for error in &outcome.rejected {
            warn!("Grid edit on '{}' rejected: {}", page_id, error);
            feedback_writer.write(LedgerOperationFeedback::error(error.to_string()));
        }
        for change in &outcome.changes {
            match change {
                TableChange::ColumnRenamed { old_name, new_name, .. } => {
                    info!("Renamed column '{}' to '{}' on '{}'.", old_name, new_name, page_id);
                    feedback_writer.write(LedgerOperationFeedback::info(format!(
                        "Renamed column '{}' to '{}'.",
                        old_name, new_name
                    )));
                }
                TableChange::ColumnRetyped { column_id, old_type, new_type } => {
                    info!("Column '{}' on '{}' changed from {} to {}.", column_id, page_id, old_type, new_type);
                    feedback_writer.write(LedgerOperationFeedback::info(format!("Column type set to {}.", new_type)));
                }
                TableChange::ColumnDeleted { name, .. } => {
                    info!("Deleted column '{}' on '{}'.", name, page_id);
                    feedback_writer.write(LedgerOperationFeedback::info(format!("Deleted column '{}'.", name)));
                }
                other => trace!("Grid change on '{}': {:?}", page_id, other),
            }
        }

        // Live resizes are saved once, when the drag ends.
        let drag_ended = was_resizing && editor.state().resizing_column().is_none();
        let persisted_change = outcome
            .changes
            .iter()
            .any(|c| !matches!(c, TableChange::ColumnResized { .. }));
        if persisted_change || drag_ended {
            page_modified = true;
        }
    }

    if table_changed {
        registry.set_changed();
    }
    if page_modified {
        modified_writer.write(PageDataModifiedEvent { page_id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::entry::CellValue;
    use crate::ledger::grid_edit::{GridInput, GridKey};

    fn grid_app() -> App {
        let mut app = App::new();
        app.add_event::<GridInputEvent>()
            .add_event::<LedgerOperationFeedback>()
            .add_event::<PageDataModifiedEvent>()
            .init_resource::<PageRegistry>()
            .init_resource::<GridEditor>()
            .init_resource::<ViewCriteria>()
            .init_resource::<AppSettings>()
            .add_systems(Update, handle_grid_input);
        app
    }

    fn send(app: &mut App, input: GridInput) {
        app.world_mut().send_event(GridInputEvent(input));
    }

    fn modified_count(app: &App) -> usize {
        app.world().resource::<Events<PageDataModifiedEvent>>().len()
    }

    #[test]
    fn typing_into_a_cell_updates_the_active_page() {
        let mut app = grid_app();
        send(
            &mut app,
            GridInput::CellClicked {
                entry_id: 1,
                column_id: "col-c".into(),
            },
        );
        app.update();
        if let Some(draft) = app.world_mut().resource_mut::<GridEditor>().draft_mut() {
            *draft = "42".to_string();
        }
        send(&mut app, GridInput::Key(GridKey::Enter));
        app.update();

        let registry = app.world().resource::<PageRegistry>();
        let table = &registry.active_page().unwrap().table;
        assert_eq!(table.entry(1).unwrap().value("col-c"), Some(&CellValue::Number(42.0)));
        assert!(modified_count(&app) > 0);
    }

    #[test]
    fn placeholder_click_materializes_on_the_page() {
        let mut app = grid_app();
        send(
            &mut app,
            GridInput::CellClicked {
                entry_id: -1,
                column_id: "col-a".into(),
            },
        );
        app.update();
        let registry = app.world().resource::<PageRegistry>();
        assert_eq!(registry.active_page().unwrap().table.entries().len(), 11);
        assert_eq!(app.world().resource::<GridEditor>().state().editing_cell(), Some((11, "col-a")));
    }

    #[test]
    fn resize_is_saved_once_when_the_drag_ends() {
        let mut app = grid_app();
        send(
            &mut app,
            GridInput::ResizeStarted {
                column_id: "col-a".into(),
                pointer_x: 0.0,
            },
        );
        send(&mut app, GridInput::PointerMoved { pointer_x: 40.0 });
        app.update();
        assert_eq!(modified_count(&app), 0);

        send(&mut app, GridInput::PointerReleased);
        app.update();
        assert_eq!(modified_count(&app), 1);
        let registry = app.world().resource::<PageRegistry>();
        assert_eq!(registry.active_page().unwrap().table.column("col-a").unwrap().width, 240.0);
    }

    #[derive(Resource, Default)]
    struct RegistryTouched(bool);

    fn note_registry_change(registry: Res<PageRegistry>, mut touched: ResMut<RegistryTouched>) {
        touched.0 = registry.is_changed();
    }

    #[test]
    fn inputs_without_table_changes_leave_the_registry_untouched() {
        let mut app = grid_app();
        app.init_resource::<RegistryTouched>()
            .add_systems(Update, note_registry_change.after(handle_grid_input));
        app.update();

        send(
            &mut app,
            GridInput::CellClicked {
                entry_id: 1,
                column_id: "col-c".into(),
            },
        );
        app.update();
        assert!(!app.world().resource::<RegistryTouched>().0);

        if let Some(draft) = app.world_mut().resource_mut::<GridEditor>().draft_mut() {
            *draft = "7".to_string();
        }
        send(&mut app, GridInput::Blur);
        app.update();
        assert!(app.world().resource::<RegistryTouched>().0);
    }

    #[test]
    fn appended_row_hidden_by_search_is_not_left_open() {
        let mut app = grid_app();
        {
            let mut registry = app.world_mut().resource_mut::<PageRegistry>();
            let page_id = registry.active_page_id().to_string();
            registry
                .table_mut(&page_id)
                .unwrap()
                .update_entry_value(1, "col-a", "Apple")
                .unwrap();
        }
        app.world_mut().resource_mut::<ViewCriteria>().search = "apple".into();

        send(
            &mut app,
            GridInput::CellClicked {
                entry_id: 1,
                column_id: "col-a".into(),
            },
        );
        send(&mut app, GridInput::Key(GridKey::Enter));
        app.update();

        let registry = app.world().resource::<PageRegistry>();
        let table = &registry.active_page().unwrap().table;
        assert_eq!(table.entries().len(), 11);
        assert_eq!(table.entry(1).unwrap().value("col-a"), Some(&CellValue::Text("Apple".into())));
        assert!(app.world().resource::<GridEditor>().state().is_idle());
    }

    #[test]
    fn rejected_rename_reports_an_error() {
        let mut app = grid_app();
        send(&mut app, GridInput::HeaderClicked { column_id: "col-a".into() });
        app.update();
        if let Some(draft) = app.world_mut().resource_mut::<GridEditor>().draft_mut() {
            draft.clear();
        }
        send(&mut app, GridInput::Blur);
        app.update();

        let feedback = app.world().resource::<Events<LedgerOperationFeedback>>();
        let mut cursor = feedback.get_cursor();
        assert!(cursor.read(feedback).any(|f| f.is_error));
    }
}
