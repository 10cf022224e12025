// src/ui/elements/editor/state.rs
use std::collections::BTreeSet;

use bevy::prelude::Resource;

use crate::ledger::{
    cell_input::{parse_date_input, parse_number_input},
    column_definition::ColumnDefinition,
    column_type::ColumnType,
    entry::{CellValue, EntryId},
    filter::{FilterCondition, FilterValue},
    grid_edit::GridInput,
};

/// Widget-level state of the editor window. Ledger data lives in
/// `PageRegistry`; this only tracks panels, popups and selections.
#[derive(Resource, Debug, Default)]
pub struct EditorWindowState {
    /// Page the widgets below were built for.
    pub shown_page_id: String,

    // Sidebar
    pub page_search: String,

    // Popups
    pub show_new_page_popup: bool,
    pub new_page_name: String,
    pub rename_target: Option<String>,
    pub rename_input: String,
    pub delete_target: Option<String>,

    // Filter panel
    pub show_filter_panel: bool,
    pub filter_drafts: Vec<FilterDraft>,

    // Grid
    pub selected_entries: BTreeSet<EntryId>,
    /// Target that last received keyboard focus, so a newly opened editor
    /// grabs focus exactly once.
    pub focused_target: Option<FocusTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Cell(EntryId, String),
    Header(String),
}

/// A filter being edited in the panel. The operand is kept as typed text
/// until the drafts are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDraft {
    pub condition: FilterCondition,
    pub operand_input: String,
}

impl FilterDraft {
    pub fn from_condition(condition: FilterCondition) -> Self {
        FilterDraft {
            operand_input: condition.value.to_plain_string(),
            condition,
        }
    }
}

impl EditorWindowState {
    pub fn open_new_page_popup(&mut self) {
        self.new_page_name.clear();
        self.show_new_page_popup = true;
    }

    pub fn open_rename_popup(&mut self, page_id: &str, current_name: &str) {
        self.rename_target = Some(page_id.to_string());
        self.rename_input = current_name.to_string();
    }

    /// Seeds the drafts from the filters currently applied.
    pub fn open_filter_panel(&mut self, applied: &[FilterCondition]) {
        self.filter_drafts = applied.iter().cloned().map(FilterDraft::from_condition).collect();
        self.show_filter_panel = true;
    }

    /// Called when the active page changes under the editor.
    pub fn reset_for_page_switch(&mut self) {
        self.selected_entries.clear();
        self.filter_drafts.clear();
        self.show_filter_panel = false;
        self.focused_target = None;
    }

    /// Drops selected rows that are no longer shown.
    pub fn retain_visible_selection(&mut self, visible: &[EntryId]) {
        self.selected_entries.retain(|id| visible.contains(id));
    }

    /// True the first time `target` is seen; the caller then requests focus.
    pub fn take_focus_request(&mut self, target: FocusTarget) -> bool {
        if self.focused_target.as_ref() == Some(&target) {
            return false;
        }
        self.focused_target = Some(target);
        true
    }
}

/// Turns operand text into the value stored on a condition. Number
/// operands are parsed leniently, dates accept `dd/mm/yyyy` and are
/// stored as ISO text; anything unparseable is kept as typed.
pub fn operand_from_input(column_type: ColumnType, raw: &str) -> FilterValue {
    match column_type {
        ColumnType::Number => match parse_number_input(raw) {
            CellValue::Number(n) => FilterValue::Number(n),
            _ => FilterValue::Text(raw.trim().to_string()),
        },
        ColumnType::Date => match parse_date_input(raw) {
            CellValue::Text(iso) if !iso.is_empty() => FilterValue::Text(iso),
            _ => FilterValue::Text(raw.trim().to_string()),
        },
        ColumnType::Text | ColumnType::Action => FilterValue::Text(raw.to_string()),
    }
}

/// Conditions to apply from the panel drafts. Drafts whose column has
/// gone away are skipped.
pub fn apply_drafts(drafts: &[FilterDraft], columns: &[ColumnDefinition]) -> Vec<FilterCondition> {
    drafts
        .iter()
        .filter_map(|draft| {
            let column = columns.iter().find(|c| c.id == draft.condition.column_id)?;
            let mut condition = draft.condition.clone();
            condition.value = operand_from_input(column.column_type, &draft.operand_input);
            Some(condition)
        })
        .collect()
}

/// Orders the inputs gathered during one UI pass. Focus loss caused by
/// clicking another cell or header must not close the editor that click
/// opens, so a `Blur` is dropped when the same pass opened something.
pub fn settle_inputs(inputs: Vec<GridInput>) -> Vec<GridInput> {
    let opens_target = inputs.iter().any(|input| {
        matches!(
            input,
            GridInput::CellClicked { .. }
                | GridInput::HeaderClicked { .. }
                | GridInput::TypeMenuToggled { .. }
                | GridInput::ResizeStarted { .. }
        )
    });
    if !opens_target {
        return inputs;
    }
    inputs.into_iter().filter(|input| *input != GridInput::Blur).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::filter::FilterOperator;
    use crate::ledger::grid_edit::GridKey;

    #[test]
    fn blur_dropped_when_a_click_opens_another_cell() {
        let inputs = vec![
            GridInput::CellClicked {
                entry_id: 2,
                column_id: "col-a".into(),
            },
            GridInput::Blur,
        ];
        let settled = settle_inputs(inputs);
        assert_eq!(settled.len(), 1);
        assert!(matches!(settled[0], GridInput::CellClicked { entry_id: 2, .. }));
    }

    #[test]
    fn lone_blur_and_keys_are_kept() {
        let inputs = vec![GridInput::Key(GridKey::Tab), GridInput::Blur];
        assert_eq!(settle_inputs(inputs.clone()), inputs);
    }

    #[test]
    fn number_operand_is_parsed() {
        assert_eq!(operand_from_input(ColumnType::Number, "$1,200"), FilterValue::Number(1200.0));
        assert_eq!(
            operand_from_input(ColumnType::Number, "abc"),
            FilterValue::Text("abc".into())
        );
    }

    #[test]
    fn date_operand_accepts_day_first_input() {
        assert_eq!(
            operand_from_input(ColumnType::Date, "05/03/2024"),
            FilterValue::Text("2024-03-05".into())
        );
        assert_eq!(
            operand_from_input(ColumnType::Date, "2024-03-05"),
            FilterValue::Text("2024-03-05".into())
        );
    }

    #[test]
    fn applied_drafts_carry_parsed_operands() {
        let columns = vec![
            ColumnDefinition::new("col-c", "Total Amount", ColumnType::Number, 120.0),
            ColumnDefinition::new("col-d", "Paid On", ColumnType::Date, 120.0),
        ];
        let mut amount = FilterDraft::from_condition(FilterCondition::new(
            "col-c",
            FilterOperator::Gt,
            FilterValue::default(),
        ));
        amount.operand_input = "250".into();
        let mut orphan = amount.clone();
        orphan.condition.column_id = "col-gone".into();

        let applied = apply_drafts(&[amount, orphan], &columns);
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].value, FilterValue::Number(250.0));
        assert_eq!(applied[0].operator, FilterOperator::Gt);
    }

    #[test]
    fn focus_is_requested_once_per_target() {
        let mut state = EditorWindowState::default();
        let target = FocusTarget::Cell(1, "col-a".into());
        assert!(state.take_focus_request(target.clone()));
        assert!(!state.take_focus_request(target));
        assert!(state.take_focus_request(FocusTarget::Header("col-a".into())));
    }

    #[test]
    fn filter_panel_starts_from_applied_filters() {
        let mut state = EditorWindowState::default();
        let applied = vec![FilterCondition::new("col-c", FilterOperator::Gt, FilterValue::Number(5.0))];
        state.open_filter_panel(&applied);
        assert!(state.show_filter_panel);
        assert_eq!(state.filter_drafts.len(), 1);
        assert_eq!(state.filter_drafts[0].operand_input, "5");
    }

    #[test]
    fn selection_follows_visible_rows() {
        let mut state = EditorWindowState::default();
        state.selected_entries.extend([1, 2, 3]);
        state.retain_visible_selection(&[2, 3, 4]);
        assert_eq!(state.selected_entries.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }
}
