// src/ui/elements/editor/main_editor.rs
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use egui_extras::{Column, TableBuilder};

use super::footer::ledger_footer;
use super::state::{settle_inputs, EditorWindowState};
use super::table_body::ledger_table_body;
use super::table_header::ledger_table_header;
use crate::ledger::{
    events::{
        AddEntryRequest, GridInputEvent, RequestAddColumn, RequestCreatePage, RequestDeleteEntries,
        RequestDeletePage, RequestRenamePage, RequestSaveLedger, RequestSetActivePage,
    },
    grid_edit::{GridEditor, GridInput, GridKey},
    resources::{PageRegistry, ViewCriteria, VisibleEntries},
};
use crate::ui::{
    elements::{
        filter_panel::show_filter_panel,
        popups::{show_delete_page_popup, show_new_page_popup, show_rename_page_popup},
        sidebar::show_page_sidebar,
        top_panel::show_top_panel,
    },
    UiFeedbackState,
};

#[allow(clippy::too_many_arguments)]
pub fn ledger_editor_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<EditorWindowState>,
    registry: Res<PageRegistry>,
    mut criteria: ResMut<ViewCriteria>,
    visible: Res<VisibleEntries>,
    mut editor: ResMut<GridEditor>,
    ui_feedback: Res<UiFeedbackState>,
    mut create_page_writer: EventWriter<RequestCreatePage>,
    mut rename_page_writer: EventWriter<RequestRenamePage>,
    mut delete_page_writer: EventWriter<RequestDeletePage>,
    mut set_active_writer: EventWriter<RequestSetActivePage>,
    mut add_column_writer: EventWriter<RequestAddColumn>,
    mut add_entry_writer: EventWriter<AddEntryRequest>,
    mut delete_entries_writer: EventWriter<RequestDeleteEntries>,
    mut grid_writer: EventWriter<GridInputEvent>,
    mut save_writer: EventWriter<RequestSaveLedger>,
) {
    let ctx = contexts.ctx_mut();

    if state.shown_page_id != registry.active_page_id() {
        debug!("Editor now showing page '{}'.", registry.active_page_id());
        state.reset_for_page_switch();
        state.shown_page_id = registry.active_page_id().to_string();
    }
    state.retain_visible_selection(&visible.entry_ids);
    if editor.state().editing_cell().is_none() && editor.state().editing_header().is_none() {
        state.focused_target = None;
    }

    show_new_page_popup(ctx, &mut state, &mut create_page_writer);
    show_rename_page_popup(ctx, &mut state, &registry, &mut rename_page_writer);
    show_delete_page_popup(ctx, &mut state, &registry, &mut delete_page_writer);

    egui::SidePanel::left("ledger_pages_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            show_page_sidebar(ui, &mut state, &registry, &mut set_active_writer);
        });

    let Some(page) = registry.active_page() else {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("No page selected.");
        });
        return;
    };
    let table = &page.table;

    if state.show_filter_panel {
        egui::SidePanel::right("ledger_filter_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                show_filter_panel(ui, &mut state, &mut criteria, table.columns());
            });
    }

    // The derived view can lag a frame behind a page switch.
    let view_is_current = visible.page_id == page.id;
    egui::TopBottomPanel::bottom("ledger_footer_panel").show(ctx, |ui| {
        if view_is_current {
            ledger_footer(ui, &visible.totals, visible.entry_ids.len(), table.entries().len());
        }
    });

    let mut inputs: Vec<GridInput> = Vec::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        let row_height = ui.text_style_height(&egui::TextStyle::Body) + ui.style().spacing.item_spacing.y * 2.0;

        show_top_panel(
            ui,
            &mut state,
            &mut criteria,
            page,
            &mut add_entry_writer,
            &mut add_column_writer,
            &mut delete_entries_writer,
            &mut save_writer,
        );

        if !ui_feedback.last_message.is_empty() {
            let text_color = if ui_feedback.is_error {
                egui::Color32::RED
            } else {
                ui.style().visuals.text_color()
            };
            ui.colored_label(text_color, &ui_feedback.last_message);
        }
        ui.separator();

        if !view_is_current {
            ui.spinner();
            return;
        }

        egui::ScrollArea::horizontal()
            .id_salt("ledger_table_scroll_area")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let mut table_builder = TableBuilder::new(ui)
                    .striped(true)
                    .resizable(false)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .min_scrolled_height(0.0);
                for column in table.columns() {
                    table_builder = table_builder.column(Column::exact(column.width));
                }

                table_builder
                    .header(row_height + 4.0, |mut header_row| {
                        ledger_table_header(
                            &mut header_row,
                            ctx,
                            &page.id,
                            table.columns(),
                            &mut editor,
                            &mut state,
                            &mut inputs,
                            &mut add_column_writer,
                        );
                    })
                    .body(|body| {
                        ledger_table_body(
                            body,
                            row_height,
                            &page.id,
                            table,
                            &visible.rows,
                            &mut editor,
                            &mut state,
                            &mut inputs,
                            &mut delete_entries_writer,
                        );
                    });
            });
    });

    collect_menu_keys(ctx, &editor, &mut inputs);
    collect_drag_pointer(ctx, &editor, &mut inputs);

    for input in settle_inputs(inputs) {
        grid_writer.write(GridInputEvent(input));
    }
}

/// Arrow keys, Enter and Escape drive the open column type menu.
fn collect_menu_keys(ctx: &egui::Context, editor: &GridEditor, inputs: &mut Vec<GridInput>) {
    if editor.state().type_menu_column().is_none() {
        return;
    }
    let keys = [
        (egui::Key::ArrowUp, GridKey::ArrowUp),
        (egui::Key::ArrowDown, GridKey::ArrowDown),
        (egui::Key::Enter, GridKey::Enter),
        (egui::Key::Escape, GridKey::Escape),
    ];
    ctx.input(|i| {
        for (key, grid_key) in keys {
            if i.key_pressed(key) {
                inputs.push(GridInput::Key(grid_key));
            }
        }
    });
}

/// Pointer tracking for a column resize. Only active while a drag is in
/// progress; any release ends it.
fn collect_drag_pointer(ctx: &egui::Context, editor: &GridEditor, inputs: &mut Vec<GridInput>) {
    if editor.state().resizing_column().is_none() {
        return;
    }
    let (released, moved_to) = ctx.input(|i| {
        let moved_to = if i.pointer.is_moving() {
            i.pointer.latest_pos().map(|p| p.x)
        } else {
            None
        };
        (i.pointer.any_released(), moved_to)
    });
    if let Some(pointer_x) = moved_to {
        inputs.push(GridInput::PointerMoved { pointer_x });
    }
    if released {
        inputs.push(GridInput::PointerReleased);
    }
}
