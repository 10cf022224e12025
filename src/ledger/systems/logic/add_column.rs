// src/ledger/systems/logic/add_column.rs
use bevy::prelude::*;

use crate::ledger::{
    events::{LedgerOperationFeedback, PageDataModifiedEvent, RequestAddColumn},
    resources::PageRegistry,
    table::TableChange,
};
use crate::settings::AppSettings;

/// Handles requests to add a column, at the end or after an anchor column.
pub fn handle_add_column_request(
    mut events: EventReader<RequestAddColumn>,
    mut registry: ResMut<PageRegistry>,
    settings: Res<AppSettings>,
    mut feedback_writer: EventWriter<LedgerOperationFeedback>,
    mut modified_writer: EventWriter<PageDataModifiedEvent>,
) {
    for event in events.read() {
        let Some(table) = registry.table_mut(&event.page_id) else {
            feedback_writer.write(LedgerOperationFeedback::error(format!(
                "Add column failed: page '{}' not found.",
                event.page_id
            )));
            continue;
        };

        let name = event.name.as_deref().unwrap_or("");
        match table.add_column(event.position.clone(), name, event.column_type, settings.default_column_width) {
            Ok(TableChange::ColumnAdded { column_id }) => {
                let added_name = table.column(&column_id).map(|c| c.name.clone()).unwrap_or_default();
                info!(
                    "Added {} column '{}' ({}) to page '{}'.",
                    event.column_type, added_name, column_id, event.page_id
                );
                feedback_writer.write(LedgerOperationFeedback::info(format!("Added column '{}'.", added_name)));
                modified_writer.write(PageDataModifiedEvent {
                    page_id: event.page_id.clone(),
                });
            }
            Ok(other) => warn!("Unexpected change while adding a column: {:?}", other),
            Err(e) => {
                warn!("Add column on '{}' failed: {}", event.page_id, e);
                feedback_writer.write(LedgerOperationFeedback::error(format!("Add column failed: {}", e)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::column_type::ColumnType;
    use crate::ledger::table::ColumnPosition;

    fn column_app() -> App {
        let mut app = App::new();
        app.add_event::<RequestAddColumn>()
            .add_event::<LedgerOperationFeedback>()
            .add_event::<PageDataModifiedEvent>()
            .init_resource::<PageRegistry>()
            .init_resource::<AppSettings>()
            .add_systems(Update, handle_add_column_request);
        app
    }

    #[test]
    fn default_named_column_lands_after_anchor() {
        let mut app = column_app();
        let page_id = app.world().resource::<PageRegistry>().active_page_id().to_string();
        app.world_mut().send_event(RequestAddColumn {
            page_id: page_id.clone(),
            position: ColumnPosition::After("col-a".into()),
            name: None,
            column_type: ColumnType::Text,
        });
        app.update();

        let registry = app.world().resource::<PageRegistry>();
        let columns = registry.page(&page_id).unwrap().table.columns();
        assert_eq!(columns[2].name, "Column C");
        assert_eq!(columns[2].width, 120.0);
        assert_eq!(app.world().resource::<Events<PageDataModifiedEvent>>().len(), 1);
    }

    #[test]
    fn unknown_anchor_changes_nothing() {
        let mut app = column_app();
        let page_id = app.world().resource::<PageRegistry>().active_page_id().to_string();
        app.world_mut().send_event(RequestAddColumn {
            page_id: page_id.clone(),
            position: ColumnPosition::After("missing".into()),
            name: Some("Qty".into()),
            column_type: ColumnType::Number,
        });
        app.update();

        let registry = app.world().resource::<PageRegistry>();
        assert_eq!(registry.page(&page_id).unwrap().table.columns().len(), 3);
        assert_eq!(app.world().resource::<Events<PageDataModifiedEvent>>().len(), 0);
    }
}
