// src/ledger/grid_edit/engine.rs
use bevy::prelude::Resource;

use super::navigation::{enter_target, shift_tab_target, tab_target, NavTarget};
use super::state::{GridEditState, GridInput, GridKey, ResizeDrag};
use crate::ledger::cell_input::display_value;
use crate::ledger::column_type::ColumnType;
use crate::ledger::entry::{is_placeholder_id, EntryId};
use crate::ledger::error::LedgerError;
use crate::ledger::table::{LedgerTable, TableChange};

/// What one input did to the table.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EditOutcome {
    pub changes: Vec<TableChange>,
    pub rejected: Vec<LedgerError>,
}

impl EditOutcome {
    fn record(&mut self, result: Result<TableChange, LedgerError>) {
        match result {
            Ok(change) => self.changes.push(change),
            Err(e) => self.rejected.push(e),
        }
    }

    fn record_opt(&mut self, result: Result<Option<TableChange>, LedgerError>) {
        match result {
            Ok(Some(change)) => self.changes.push(change),
            Ok(None) => {}
            Err(e) => self.rejected.push(e),
        }
    }
}

/// Edit-state machine for the grid of the active page.
#[derive(Resource, Debug, Default)]
pub struct GridEditor {
    state: GridEditState,
}

impl GridEditor {
    pub fn state(&self) -> &GridEditState {
        &self.state
    }

    /// Text buffer of the cell or header being edited.
    pub fn draft_mut(&mut self) -> Option<&mut String> {
        match &mut self.state {
            GridEditState::EditingCell { draft, .. } | GridEditState::EditingHeader { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Feeds one input through the state machine. `rows` is the current
    /// display order, placeholders included.
    pub fn handle(&mut self, table: &mut LedgerTable, rows: &[EntryId], input: GridInput) -> EditOutcome {
        let mut outcome = EditOutcome::default();

        if let GridEditState::ResizingColumn(drag) = &self.state {
            match input {
                GridInput::PointerMoved { pointer_x } => {
                    // Widths under the minimum are skipped while dragging.
                    if let Ok(change) = table.resize_column(&drag.column_id, drag.width_at(pointer_x)) {
                        outcome.changes.push(change);
                    }
                    return outcome;
                }
                GridInput::PointerReleased => {
                    self.state = GridEditState::Idle;
                    return outcome;
                }
                _ => self.state = GridEditState::Idle,
            }
        }

        match input {
            GridInput::CellClicked { entry_id, column_id } => {
                if self.state.editing_cell() == Some((entry_id, column_id.as_str())) {
                    return outcome;
                }
                self.finish(table, &mut outcome);
                self.open_cell(table, entry_id, &column_id, &mut outcome);
            }
            GridInput::HeaderClicked { column_id } => {
                if self.state.editing_header() == Some(column_id.as_str()) {
                    return outcome;
                }
                self.finish(table, &mut outcome);
                match table.column(&column_id) {
                    Some(column) if column.holds_values() => {
                        self.state = GridEditState::EditingHeader {
                            draft: column.name.clone(),
                            column_id,
                        };
                    }
                    Some(_) => {}
                    None => outcome.rejected.push(LedgerError::UnknownColumn(column_id)),
                }
            }
            GridInput::TypeMenuToggled { column_id } => {
                if self.state.type_menu_column() == Some(column_id.as_str()) {
                    self.state = GridEditState::Idle;
                    return outcome;
                }
                self.finish(table, &mut outcome);
                match table.column(&column_id) {
                    Some(column) if column.holds_values() => {
                        self.state = GridEditState::ChoosingColumnType {
                            column_id,
                            highlighted: 0,
                        };
                    }
                    Some(_) => {}
                    None => outcome.rejected.push(LedgerError::UnknownColumn(column_id)),
                }
            }
            GridInput::ResizeStarted { column_id, pointer_x } => {
                self.finish(table, &mut outcome);
                match table.column(&column_id) {
                    Some(column) => {
                        self.state = GridEditState::ResizingColumn(ResizeDrag {
                            start_width: column.width,
                            column_id,
                            start_x: pointer_x,
                        });
                    }
                    None => outcome.rejected.push(LedgerError::UnknownColumn(column_id)),
                }
            }
            GridInput::PointerMoved { .. } | GridInput::PointerReleased => {}
            GridInput::Blur => self.finish(table, &mut outcome),
            GridInput::Key(key) => self.handle_key(table, rows, key, &mut outcome),
            GridInput::TypeHighlighted(index) => {
                if let GridEditState::ChoosingColumnType { highlighted, .. } = &mut self.state {
                    if index < ColumnType::SELECTABLE.len() {
                        *highlighted = index;
                    }
                }
            }
            GridInput::TypeChosen(new_type) => {
                if let Some(column_id) = self.state.type_menu_column().map(str::to_string) {
                    self.state = GridEditState::Idle;
                    outcome.record(table.retype_column(&column_id, new_type));
                }
            }
            GridInput::DeleteColumnChosen => {
                if let Some(column_id) = self.state.type_menu_column().map(str::to_string) {
                    self.state = GridEditState::Idle;
                    outcome.record(table.delete_column(&column_id));
                }
            }
        }
        outcome
    }

    /// Commits whatever is being edited and returns to `Idle`.
    pub fn commit_and_close(&mut self, table: &mut LedgerTable) -> EditOutcome {
        let mut outcome = EditOutcome::default();
        self.finish(table, &mut outcome);
        outcome
    }

    /// Drops the current state without committing anything.
    pub fn cancel(&mut self) {
        self.state = GridEditState::Idle;
    }

    /// Commits and closes a cell edit whose entry is not in `rows`, e.g. a
    /// freshly appended entry that fails the active search or filters.
    pub fn close_hidden_cell(&mut self, table: &mut LedgerTable, rows: &[EntryId]) -> EditOutcome {
        match self.state.editing_cell() {
            Some((entry_id, _)) if !rows.contains(&entry_id) => self.commit_and_close(table),
            _ => EditOutcome::default(),
        }
    }

    /// Drops back to `Idle` when the edit target no longer exists.
    /// Returns true if the state was reset.
    pub fn reconcile(&mut self, table: &LedgerTable) -> bool {
        let still_valid = match &self.state {
            GridEditState::Idle => true,
            GridEditState::EditingCell { entry_id, column_id, .. } => {
                table.entry(*entry_id).is_some() && table.column(column_id).is_some_and(|c| c.holds_values())
            }
            GridEditState::EditingHeader { column_id, .. } | GridEditState::ChoosingColumnType { column_id, .. } => {
                table.column(column_id).is_some()
            }
            GridEditState::ResizingColumn(drag) => table.column(&drag.column_id).is_some(),
        };
        if !still_valid {
            self.state = GridEditState::Idle;
        }
        !still_valid
    }

    /// Closes the current state: cell and header drafts are committed, a
    /// type menu or drag is simply dropped.
    fn finish(&mut self, table: &mut LedgerTable, outcome: &mut EditOutcome) {
        match std::mem::take(&mut self.state) {
            GridEditState::EditingCell { entry_id, column_id, draft } => {
                outcome.record_opt(table.update_entry_value(entry_id, &column_id, &draft));
            }
            GridEditState::EditingHeader { column_id, draft } => {
                let unchanged = table.column(&column_id).is_some_and(|c| c.name == draft.trim());
                if !unchanged {
                    outcome.record(table.rename_column(&column_id, &draft));
                }
            }
            GridEditState::Idle | GridEditState::ChoosingColumnType { .. } | GridEditState::ResizingColumn(_) => {}
        }
    }

    fn open_cell(&mut self, table: &mut LedgerTable, entry_id: EntryId, column_id: &str, outcome: &mut EditOutcome) {
        let Some(column) = table.column(column_id) else {
            outcome.rejected.push(LedgerError::UnknownColumn(column_id.to_string()));
            return;
        };
        if column.is_serial() {
            return;
        }
        if column.column_type == ColumnType::Action {
            let added = table.add_entry();
            outcome.changes.push(TableChange::EntryAdded { entry_id: added });
            return;
        }

        let entry_id = if is_placeholder_id(entry_id) {
            let added = table.add_entry();
            outcome.changes.push(TableChange::EntryAdded { entry_id: added });
            added
        } else {
            entry_id
        };
        self.open_existing(table, entry_id, column_id, outcome);
    }

    fn open_existing(&mut self, table: &LedgerTable, entry_id: EntryId, column_id: &str, outcome: &mut EditOutcome) {
        let Some(column) = table.column(column_id) else {
            outcome.rejected.push(LedgerError::UnknownColumn(column_id.to_string()));
            return;
        };
        let Some(entry) = table.entry(entry_id) else {
            outcome.rejected.push(LedgerError::UnknownEntry(entry_id));
            return;
        };
        self.state = GridEditState::EditingCell {
            entry_id,
            column_id: column_id.to_string(),
            draft: display_value(column.column_type, entry.value(column_id)),
        };
    }

    fn handle_key(&mut self, table: &mut LedgerTable, rows: &[EntryId], key: GridKey, outcome: &mut EditOutcome) {
        match &mut self.state {
            GridEditState::Idle | GridEditState::ResizingColumn(_) => {}
            GridEditState::EditingCell { entry_id, column_id, .. } => {
                let (entry_id, column_id) = (*entry_id, column_id.clone());
                let target = match key {
                    GridKey::Escape => {
                        self.state = GridEditState::Idle;
                        return;
                    }
                    GridKey::ArrowUp | GridKey::ArrowDown => return,
                    GridKey::Enter => enter_target(rows, entry_id, &column_id),
                    GridKey::Tab => tab_target(&table.editable_column_ids(), rows, entry_id, &column_id),
                    GridKey::ShiftTab => shift_tab_target(&table.editable_column_ids(), rows, entry_id, &column_id),
                };
                self.finish(table, outcome);
                self.navigate(table, entry_id, &column_id, target, outcome);
            }
            GridEditState::EditingHeader { .. } => match key {
                GridKey::Enter | GridKey::Tab | GridKey::ShiftTab => self.finish(table, outcome),
                GridKey::Escape => self.state = GridEditState::Idle,
                GridKey::ArrowUp | GridKey::ArrowDown => {}
            },
            GridEditState::ChoosingColumnType { column_id, highlighted } => {
                let count = ColumnType::SELECTABLE.len();
                match key {
                    GridKey::ArrowDown => *highlighted = (*highlighted + 1) % count,
                    GridKey::ArrowUp => *highlighted = (*highlighted + count - 1) % count,
                    GridKey::Enter => {
                        let chosen = ColumnType::SELECTABLE[*highlighted % count];
                        let column_id = column_id.clone();
                        self.state = GridEditState::Idle;
                        outcome.record(table.retype_column(&column_id, chosen));
                    }
                    GridKey::Escape => self.state = GridEditState::Idle,
                    GridKey::Tab | GridKey::ShiftTab => {}
                }
            }
        }
    }

    fn navigate(
        &mut self,
        table: &mut LedgerTable,
        from_entry: EntryId,
        from_column: &str,
        target: NavTarget,
        outcome: &mut EditOutcome,
    ) {
        match target {
            NavTarget::Close => {}
            NavTarget::Stay => self.open_existing(table, from_entry, from_column, outcome),
            NavTarget::AppendRow { column_id } => {
                let added = table.add_entry();
                outcome.changes.push(TableChange::EntryAdded { entry_id: added });
                self.open_existing(table, added, &column_id, outcome);
            }
            NavTarget::Cell { entry_id, column_id } => self.open_cell(table, entry_id, &column_id, outcome),
        }
    }
}
