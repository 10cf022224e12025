// src/ui/elements/filter_panel.rs
use bevy::prelude::*;
use bevy_egui::egui;

use super::editor::state::{apply_drafts, EditorWindowState, FilterDraft};
use crate::ledger::{
    column_definition::ColumnDefinition,
    column_type::ColumnType,
    filter::{FilterCondition, FilterOperator},
    resources::ViewCriteria,
};

/// Draft list of structured filters. Nothing reaches `ViewCriteria` until
/// "Apply" or "Clear All".
pub fn show_filter_panel(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    criteria: &mut ResMut<ViewCriteria>,
    columns: &[ColumnDefinition],
) {
    ui.heading("Filters");
    ui.separator();

    let value_columns: Vec<&ColumnDefinition> = columns.iter().filter(|c| c.holds_values()).collect();
    let mut remove_index = None;

    egui::ScrollArea::vertical()
        .id_salt("ledger_filter_drafts")
        .max_height((ui.available_height() - 80.0).max(120.0))
        .show(ui, |ui| {
            if state.filter_drafts.is_empty() {
                ui.weak("No filters. Add one below.");
            }
            for (index, draft) in state.filter_drafts.iter_mut().enumerate() {
                ui.group(|ui| {
                    draft_row(ui, draft, &value_columns);
                    if ui.small_button("Remove").clicked() {
                        remove_index = Some(index);
                    }
                });
            }
        });
    if let Some(index) = remove_index {
        state.filter_drafts.remove(index);
    }

    ui.separator();
    let add_button = ui.add_enabled(!value_columns.is_empty(), egui::Button::new("➕ Add Filter"));
    if add_button.clicked() {
        if let Some(condition) = FilterCondition::draft_for(columns) {
            state.filter_drafts.push(FilterDraft::from_condition(condition));
        }
    }

    ui.horizontal(|ui| {
        if ui.button("Apply").clicked() {
            criteria.filters = apply_drafts(&state.filter_drafts, columns);
            info!("Applied {} filter(s).", criteria.filters.len());
        }
        if ui.button("Clear All").clicked() {
            state.filter_drafts.clear();
            if !criteria.filters.is_empty() {
                criteria.filters.clear();
                info!("Cleared all filters.");
            }
        }
        if ui.button("Close").clicked() {
            state.show_filter_panel = false;
        }
    });
}

fn draft_row(ui: &mut egui::Ui, draft: &mut FilterDraft, value_columns: &[&ColumnDefinition]) {
    let condition_id = draft.condition.id.clone();
    let current = value_columns.iter().find(|c| c.id == draft.condition.column_id).copied();

    let mut retarget_to = None;
    egui::ComboBox::from_id_salt(("filter_column", &condition_id))
        .selected_text(current.map_or("(deleted column)", |c| c.name.as_str()))
        .show_ui(ui, |ui| {
            for column in value_columns {
                if ui
                    .selectable_label(column.id == draft.condition.column_id, &column.name)
                    .clicked()
                {
                    retarget_to = Some(*column);
                }
            }
        });
    let current = match retarget_to {
        Some(column) => {
            draft.condition.retarget(column);
            Some(column)
        }
        None => current,
    };
    let Some(column) = current else {
        return;
    };

    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt(("filter_operator", &condition_id))
            .selected_text(draft.condition.operator.label())
            .show_ui(ui, |ui| {
                for operator in FilterOperator::for_type(column.column_type) {
                    ui.selectable_value(&mut draft.condition.operator, *operator, operator.label());
                }
            });
        let hint = match column.column_type {
            ColumnType::Number => "0.00",
            ColumnType::Date => "dd/mm/yyyy",
            ColumnType::Text | ColumnType::Action => "value",
        };
        ui.add(
            egui::TextEdit::singleline(&mut draft.operand_input)
                .hint_text(hint)
                .desired_width(110.0),
        );
    });
}
