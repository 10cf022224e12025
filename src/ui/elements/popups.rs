// src/ui/elements/popups.rs
use bevy::prelude::*;
use bevy_egui::egui;

use super::editor::EditorWindowState;
use crate::ledger::{
    events::{RequestCreatePage, RequestDeletePage, RequestRenamePage},
    resources::PageRegistry,
};

pub fn show_new_page_popup(
    ctx: &egui::Context,
    state: &mut EditorWindowState,
    create_writer: &mut EventWriter<RequestCreatePage>,
) {
    if !state.show_new_page_popup {
        return;
    }

    let mut popup_open = true;
    let mut create_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new("New Page")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut popup_open)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name:");
                let response = ui.add(egui::TextEdit::singleline(&mut state.new_page_name).desired_width(180.0));
                response.request_focus();
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    create_clicked = true;
                }
            });
            ui.separator();
            ui.horizontal(|ui| {
                let valid = !state.new_page_name.trim().is_empty();
                if ui.add_enabled(valid, egui::Button::new("Create")).clicked() {
                    create_clicked = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel_clicked = true;
                }
            });
        });

    let name = state.new_page_name.trim();
    if create_clicked && !name.is_empty() {
        create_writer.write(RequestCreatePage { name: name.to_string() });
        state.show_new_page_popup = false;
    } else if cancel_clicked || !popup_open {
        state.show_new_page_popup = false;
    }
}

pub fn show_rename_page_popup(
    ctx: &egui::Context,
    state: &mut EditorWindowState,
    registry: &PageRegistry,
    rename_writer: &mut EventWriter<RequestRenamePage>,
) {
    let Some(page_id) = state.rename_target.clone() else {
        return;
    };
    let Some(page) = registry.page(&page_id) else {
        // Deleted while the popup was open.
        state.rename_target = None;
        return;
    };

    let mut popup_open = true;
    let mut rename_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new("Rename Page")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut popup_open)
        .show(ctx, |ui| {
            ui.label(format!("Renaming page: '{}'", page.name));
            ui.separator();
            ui.horizontal(|ui| {
                ui.label("New Name:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.rename_input)
                        .desired_width(180.0)
                        .lock_focus(true),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    rename_clicked = true;
                }
            });
            ui.separator();
            ui.horizontal(|ui| {
                let valid = !state.rename_input.trim().is_empty();
                if ui.add_enabled(valid, egui::Button::new("Rename")).clicked() {
                    rename_clicked = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel_clicked = true;
                }
            });
        });

    let new_name = state.rename_input.trim();
    if rename_clicked && !new_name.is_empty() {
        rename_writer.write(RequestRenamePage {
            page_id,
            new_name: new_name.to_string(),
        });
        state.rename_target = None;
    } else if cancel_clicked || !popup_open {
        state.rename_target = None;
    }
}

pub fn show_delete_page_popup(
    ctx: &egui::Context,
    state: &mut EditorWindowState,
    registry: &PageRegistry,
    delete_writer: &mut EventWriter<RequestDeletePage>,
) {
    let Some(page_id) = state.delete_target.clone() else {
        return;
    };
    let Some(page) = registry.page(&page_id) else {
        state.delete_target = None;
        return;
    };

    let mut popup_open = true;
    let mut delete_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new("Confirm Delete")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut popup_open)
        .show(ctx, |ui| {
            ui.label(format!("Permanently delete page '{}'?", page.name));
            ui.label(format!(
                "Its {} rows and {} columns will be removed.",
                page.table.entries().len(),
                page.table.columns().len()
            ));
            ui.colored_label(egui::Color32::YELLOW, "This action cannot be undone.");
            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add(egui::Button::new("DELETE").fill(egui::Color32::DARK_RED))
                    .clicked()
                {
                    delete_clicked = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel_clicked = true;
                }
            });
        });

    if delete_clicked {
        delete_writer.write(RequestDeletePage { page_id });
    }
    if delete_clicked || cancel_clicked || !popup_open {
        state.delete_target = None;
    }
}
