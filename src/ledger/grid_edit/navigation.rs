// src/ledger/grid_edit/navigation.rs
//! Keyboard movement between cells.
//!
//! `rows` is the display order of the grid: visible entries first, then
//! placeholder rows (non-positive ids). `columns` lists the editable column
//! ids in display order.

use crate::ledger::entry::{is_placeholder_id, EntryId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// Edit this cell next. A placeholder id has to be materialized first.
    Cell { entry_id: EntryId, column_id: String },
    /// Append a row and edit this column in it.
    AppendRow { column_id: String },
    /// Keep editing the current cell.
    Stay,
    /// Leave cell editing.
    Close,
}

pub fn tab_target(columns: &[&str], rows: &[EntryId], entry_id: EntryId, column_id: &str) -> NavTarget {
    let Some(col_idx) = columns.iter().position(|c| *c == column_id) else {
        return NavTarget::Close;
    };
    if let Some(next) = columns.get(col_idx + 1) {
        return NavTarget::Cell {
            entry_id,
            column_id: next.to_string(),
        };
    }
    let first = columns[0].to_string();
    match rows.iter().position(|r| *r == entry_id) {
        Some(row_idx) if row_idx + 1 < rows.len() => NavTarget::Cell {
            entry_id: rows[row_idx + 1],
            column_id: first,
        },
        Some(_) => NavTarget::AppendRow { column_id: first },
        None => NavTarget::Close,
    }
}

pub fn shift_tab_target(columns: &[&str], rows: &[EntryId], entry_id: EntryId, column_id: &str) -> NavTarget {
    let Some(col_idx) = columns.iter().position(|c| *c == column_id) else {
        return NavTarget::Close;
    };
    if col_idx > 0 {
        return NavTarget::Cell {
            entry_id,
            column_id: columns[col_idx - 1].to_string(),
        };
    }
    match rows.iter().position(|r| *r == entry_id) {
        Some(row_idx) if row_idx > 0 && !is_placeholder_id(rows[row_idx - 1]) => NavTarget::Cell {
            entry_id: rows[row_idx - 1],
            column_id: columns[columns.len() - 1].to_string(),
        },
        _ => NavTarget::Stay,
    }
}

/// Enter on the last real row opens the same column in a new row.
pub fn enter_target(rows: &[EntryId], entry_id: EntryId, column_id: &str) -> NavTarget {
    let last_real = rows.iter().rev().copied().find(|r| !is_placeholder_id(*r));
    if last_real == Some(entry_id) {
        NavTarget::AppendRow {
            column_id: column_id.to_string(),
        }
    } else {
        NavTarget::Close
    }
}
