// src/ui/elements/editor/table_header.rs
use bevy::prelude::*;
use bevy_egui::egui::{self, Color32, CursorIcon, Id, Order, RichText, Sense, Stroke};
use egui_extras::TableRow;

use super::state::{EditorWindowState, FocusTarget};
use super::table_body::draft_text_edit;
use crate::ledger::{
    column_definition::ColumnDefinition,
    column_type::ColumnType,
    events::RequestAddColumn,
    grid_edit::{GridEditState, GridEditor, GridInput},
    table::ColumnPosition,
};

const RESIZE_HANDLE_WIDTH: f32 = 6.0;

#[allow(clippy::too_many_arguments)]
pub fn ledger_table_header(
    header_row: &mut TableRow,
    ctx: &egui::Context,
    page_id: &str,
    columns: &[ColumnDefinition],
    editor: &mut ResMut<GridEditor>,
    state: &mut EditorWindowState,
    inputs: &mut Vec<GridInput>,
    add_column_writer: &mut EventWriter<RequestAddColumn>,
) {
    for column in columns {
        header_row.col(|ui| {
            let cell_rect = ui.max_rect();

            if editor.state().editing_header() == Some(column.id.as_str()) {
                let grab_focus = state.take_focus_request(FocusTarget::Header(column.id.clone()));
                if let Some(draft) = editor.draft_mut() {
                    let id = Id::new("ledger_header_draft").with(&column.id);
                    draft_text_edit(ui, id, draft, grab_focus, inputs);
                }
            } else if column.holds_values() {
                ui.horizontal(|ui| {
                    let label = ui
                        .add(egui::Label::new(RichText::new(&column.name).strong()).truncate().sense(Sense::click()))
                        .on_hover_text(format!("{} column. Click to rename.", column.column_type));
                    if label.clicked() {
                        inputs.push(GridInput::HeaderClicked {
                            column_id: column.id.clone(),
                        });
                    }
                    let menu_button = ui.small_button("⏷").on_hover_text("Column type");
                    if menu_button.clicked() {
                        inputs.push(GridInput::TypeMenuToggled {
                            column_id: column.id.clone(),
                        });
                    }
                    if let GridEditState::ChoosingColumnType { column_id, highlighted } = editor.state() {
                        if column_id == &column.id {
                            show_type_menu(
                                ctx,
                                menu_button.rect.left_bottom(),
                                page_id,
                                column,
                                *highlighted,
                                inputs,
                                add_column_writer,
                            );
                        }
                    }
                });
            } else {
                ui.label(RichText::new(&column.name).strong());
            }

            resize_handle(ui, ctx, cell_rect, column, editor.state().resizing_column(), inputs);
        });
    }
}

fn resize_handle(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    cell_rect: egui::Rect,
    column: &ColumnDefinition,
    resizing: Option<&str>,
    inputs: &mut Vec<GridInput>,
) {
    let handle_rect = egui::Rect::from_min_max(
        egui::pos2(cell_rect.right() - RESIZE_HANDLE_WIDTH, cell_rect.top()),
        cell_rect.right_bottom(),
    );
    let response = ui.interact(handle_rect, Id::new("ledger_column_resize").with(&column.id), Sense::drag());
    let active = resizing == Some(column.id.as_str());
    if response.hovered() || active {
        ctx.set_cursor_icon(CursorIcon::ResizeHorizontal);
        ui.painter().vline(
            handle_rect.center().x,
            handle_rect.y_range(),
            Stroke::new(2.0, ui.visuals().selection.bg_fill),
        );
    }
    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            inputs.push(GridInput::ResizeStarted {
                column_id: column.id.clone(),
                pointer_x: pos.x,
            });
        }
    }
}

fn show_type_menu(
    ctx: &egui::Context,
    anchor: egui::Pos2,
    page_id: &str,
    column: &ColumnDefinition,
    highlighted: usize,
    inputs: &mut Vec<GridInput>,
    add_column_writer: &mut EventWriter<RequestAddColumn>,
) {
    egui::Area::new(Id::new("ledger_type_menu").with(&column.id))
        .order(Order::Foreground)
        .fixed_pos(anchor)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(140.0);
                for (index, column_type) in ColumnType::SELECTABLE.iter().enumerate() {
                    let marker = if *column_type == column.column_type { "✔ " } else { "" };
                    let response = ui.selectable_label(index == highlighted, format!("{}{}", marker, column_type.label()));
                    if response.hovered() && index != highlighted {
                        inputs.push(GridInput::TypeHighlighted(index));
                    }
                    if response.clicked() {
                        inputs.push(GridInput::TypeChosen(*column_type));
                    }
                }
                ui.separator();
                if ui.button("Insert Column After").clicked() {
                    add_column_writer.write(RequestAddColumn {
                        page_id: page_id.to_string(),
                        position: ColumnPosition::After(column.id.clone()),
                        name: None,
                        column_type: ColumnType::Text,
                    });
                    inputs.push(GridInput::TypeMenuToggled {
                        column_id: column.id.clone(),
                    });
                }
                if ui
                    .add(egui::Button::new(RichText::new("Delete Column").color(Color32::WHITE)).fill(Color32::DARK_RED))
                    .clicked()
                {
                    inputs.push(GridInput::DeleteColumnChosen);
                }
            });
        });
}
