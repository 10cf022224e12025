// src/ui/elements/sidebar.rs
use bevy::prelude::*;
use bevy_egui::egui;

use super::editor::EditorWindowState;
use crate::ledger::{events::RequestSetActivePage, resources::PageRegistry};

/// Page list with a name search. Right-click a page to rename or delete it.
pub fn show_page_sidebar(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    registry: &PageRegistry,
    set_active_writer: &mut EventWriter<RequestSetActivePage>,
) {
    ui.heading("Pages");
    ui.add(
        egui::TextEdit::singleline(&mut state.page_search)
            .hint_text("Search pages")
            .desired_width(f32::INFINITY),
    );
    if ui.button("➕ New Page").clicked() {
        state.open_new_page_popup();
    }
    ui.separator();

    let can_delete = registry.pages().len() > 1;
    egui::ScrollArea::vertical()
        .id_salt("ledger_page_list")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            let matches = registry.search_pages(&state.page_search);
            if matches.is_empty() {
                ui.weak("No pages match.");
            }
            for page in matches {
                let is_active = page.id == registry.active_page_id();
                let response = ui.selectable_label(is_active, &page.name);
                if response.clicked() && !is_active {
                    set_active_writer.write(RequestSetActivePage {
                        page_id: page.id.clone(),
                    });
                }
                response.context_menu(|ui| {
                    if ui.button("Rename…").clicked() {
                        state.open_rename_popup(&page.id, &page.name);
                        ui.close_menu();
                    }
                    let delete = ui
                        .add_enabled(can_delete, egui::Button::new("Delete"))
                        .on_disabled_hover_text("A ledger keeps at least one page.");
                    if delete.clicked() {
                        state.delete_target = Some(page.id.clone());
                        ui.close_menu();
                    }
                });
            }
        });
}
