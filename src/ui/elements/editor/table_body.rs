// src/ui/elements/editor/table_body.rs
use bevy::prelude::*;
use bevy_egui::egui::{self, Align2, CursorIcon, Key, Modifiers, Sense, TextStyle};
use egui_extras::{TableBody, TableRow};

use super::state::{EditorWindowState, FocusTarget};
use crate::ledger::{
    cell_input::display_value,
    column_definition::ColumnDefinition,
    column_type::ColumnType,
    entry::{Entry, EntryId},
    events::RequestDeleteEntries,
    grid_edit::{GridEditor, GridInput, GridKey},
    table::LedgerTable,
};

/// Single-line field bound to the edit draft. Tab and Shift+Tab are taken
/// before the field sees them; Enter and Escape are read from the focus
/// loss. Losing focus any other way is a blur.
pub(super) fn draft_text_edit(
    ui: &mut egui::Ui,
    id: egui::Id,
    draft: &mut String,
    grab_focus: bool,
    inputs: &mut Vec<GridInput>,
) {
    let has_focus = ui.memory(|m| m.has_focus(id));
    let (tab, shift_tab) = if has_focus {
        ui.input_mut(|i| {
            let shift_tab = i.consume_key(Modifiers::SHIFT, Key::Tab);
            let tab = i.consume_key(Modifiers::NONE, Key::Tab);
            (tab, shift_tab)
        })
    } else {
        (false, false)
    };

    let response = ui.add(
        egui::TextEdit::singleline(draft)
            .id(id)
            .desired_width(f32::INFINITY)
            .lock_focus(true),
    );
    if grab_focus {
        response.request_focus();
    }

    if shift_tab {
        inputs.push(GridInput::Key(GridKey::ShiftTab));
    } else if tab {
        inputs.push(GridInput::Key(GridKey::Tab));
    } else if response.lost_focus() {
        let (enter, escape) = ui.input(|i| (i.key_pressed(Key::Enter), i.key_pressed(Key::Escape)));
        let input = if enter {
            GridInput::Key(GridKey::Enter)
        } else if escape {
            GridInput::Key(GridKey::Escape)
        } else {
            GridInput::Blur
        };
        inputs.push(input);
    }
}

/// Renders the display rows of the active page. Placeholder rows are drawn
/// like real ones; clicking them lets the edit engine create the entry.
#[allow(clippy::too_many_arguments)]
pub fn ledger_table_body(
    body: TableBody,
    row_height: f32,
    page_id: &str,
    table: &LedgerTable,
    rows: &[EntryId],
    editor: &mut ResMut<GridEditor>,
    state: &mut EditorWindowState,
    inputs: &mut Vec<GridInput>,
    delete_writer: &mut EventWriter<RequestDeleteEntries>,
) {
    body.rows(row_height, rows.len(), |mut row: TableRow| {
        let row_index = row.index();
        let Some(&entry_id) = rows.get(row_index) else {
            error!("Display row {} out of bounds ({} rows).", row_index, rows.len());
            return;
        };
        let entry = table.entry(entry_id);

        for column in table.columns() {
            row.col(|ui| {
                if column.is_serial() {
                    serial_cell(ui, state, row_index, entry_id, entry.is_some());
                } else if column.column_type == ColumnType::Action {
                    action_cell(ui, page_id, entry_id, entry.is_some(), column, inputs, delete_writer);
                } else if editor.state().editing_cell() == Some((entry_id, column.id.as_str())) {
                    let grab_focus = state.take_focus_request(FocusTarget::Cell(entry_id, column.id.clone()));
                    if let Some(draft) = editor.draft_mut() {
                        let id = egui::Id::new("ledger_cell_draft").with(entry_id).with(&column.id);
                        draft_text_edit(ui, id, draft, grab_focus, inputs);
                    }
                } else {
                    value_cell(ui, row_height, entry_id, entry, column, inputs);
                }
            });
        }
    });
}

fn serial_cell(ui: &mut egui::Ui, state: &mut EditorWindowState, row_index: usize, entry_id: EntryId, persisted: bool) {
    let number = (row_index + 1).to_string();
    if !persisted {
        ui.weak(number);
        return;
    }
    let selected = state.selected_entries.contains(&entry_id);
    if ui
        .selectable_label(selected, number)
        .on_hover_text("Select row")
        .clicked()
    {
        if selected {
            state.selected_entries.remove(&entry_id);
        } else {
            state.selected_entries.insert(entry_id);
        }
    }
}

fn action_cell(
    ui: &mut egui::Ui,
    page_id: &str,
    entry_id: EntryId,
    persisted: bool,
    column: &ColumnDefinition,
    inputs: &mut Vec<GridInput>,
    delete_writer: &mut EventWriter<RequestDeleteEntries>,
) {
    if persisted {
        if ui.small_button("🗑").on_hover_text("Delete row").clicked() {
            delete_writer.write(RequestDeleteEntries {
                page_id: page_id.to_string(),
                entry_ids: vec![entry_id],
            });
        }
    } else if ui.small_button("➕").on_hover_text("Add row").clicked() {
        inputs.push(GridInput::CellClicked {
            entry_id,
            column_id: column.id.clone(),
        });
    }
}

fn value_cell(
    ui: &mut egui::Ui,
    row_height: f32,
    entry_id: EntryId,
    entry: Option<&Entry>,
    column: &ColumnDefinition,
    inputs: &mut Vec<GridInput>,
) {
    let text = display_value(column.column_type, entry.and_then(|e| e.value(&column.id)));
    let (rect, response) = ui.allocate_exact_size(egui::vec2(ui.available_width(), row_height), Sense::click());
    let color = ui.visuals().text_color();
    ui.painter().with_clip_rect(rect).text(
        rect.left_center() + egui::vec2(4.0, 0.0),
        Align2::LEFT_CENTER,
        text,
        TextStyle::Body.resolve(ui.style()),
        color,
    );
    if response.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::Text);
    }
    if response.clicked() {
        inputs.push(GridInput::CellClicked {
            entry_id,
            column_id: column.id.clone(),
        });
    }
}
