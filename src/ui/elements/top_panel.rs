// src/ui/elements/top_panel.rs
use bevy::prelude::*;
use bevy_egui::egui;

use super::editor::EditorWindowState;
use crate::ledger::{
    column_type::ColumnType,
    events::{AddEntryRequest, RequestAddColumn, RequestDeleteEntries, RequestSaveLedger},
    page::LedgerPage,
    resources::ViewCriteria,
    table::ColumnPosition,
};

/// Page title, row search, filter toggle and the add/delete/save buttons.
/// Any write through `criteria` rebuilds the derived view, so it is only
/// written on user changes.
#[allow(clippy::too_many_arguments)]
pub fn show_top_panel(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    criteria: &mut ResMut<ViewCriteria>,
    page: &LedgerPage,
    add_entry_writer: &mut EventWriter<AddEntryRequest>,
    add_column_writer: &mut EventWriter<RequestAddColumn>,
    delete_entries_writer: &mut EventWriter<RequestDeleteEntries>,
    save_writer: &mut EventWriter<RequestSaveLedger>,
) {
    ui.horizontal_wrapped(|ui| {
        ui.heading(&page.name);
        ui.separator();

        let mut search = criteria.search.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .hint_text("Search rows")
                .desired_width(200.0),
        );
        if response.changed() {
            criteria.search = search;
        }
        if !criteria.search.is_empty() && ui.small_button("✖").on_hover_text("Clear search").clicked() {
            criteria.search.clear();
        }

        let filter_label = if criteria.filters.is_empty() {
            "Filters".to_string()
        } else {
            format!("Filters ({})", criteria.filters.len())
        };
        if ui.selectable_label(state.show_filter_panel, filter_label).clicked() {
            if state.show_filter_panel {
                state.show_filter_panel = false;
            } else {
                state.open_filter_panel(&criteria.filters);
            }
        }

        ui.separator();

        if ui.button("➕ Add Row").clicked() {
            add_entry_writer.write(AddEntryRequest {
                page_id: page.id.clone(),
            });
        }
        if ui.button("➕ Add Column").clicked() {
            add_column_writer.write(RequestAddColumn {
                page_id: page.id.clone(),
                position: ColumnPosition::End,
                name: None,
                column_type: ColumnType::Text,
            });
        }

        let selected = state.selected_entries.len();
        let delete_button = egui::Button::new(format!("🗑 Delete Rows ({})", selected));
        if ui
            .add_enabled(selected > 0, delete_button)
            .on_disabled_hover_text("Select rows by clicking their S.No")
            .clicked()
        {
            delete_entries_writer.write(RequestDeleteEntries {
                page_id: page.id.clone(),
                entry_ids: state.selected_entries.iter().copied().collect(),
            });
            state.selected_entries.clear();
        }

        ui.separator();
        if ui.button("💾 Save").clicked() {
            save_writer.write(RequestSaveLedger);
        }
    });
}
