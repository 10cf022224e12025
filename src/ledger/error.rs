// src/ledger/error.rs
use thiserror::Error;

use super::entry::EntryId;

/// Reasons a ledger mutation was refused. A refused mutation leaves the
/// table untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Page '{0}' not found.")]
    UnknownPage(String),
    #[error("Column '{0}' not found.")]
    UnknownColumn(String),
    #[error("Row {0} not found.")]
    UnknownEntry(EntryId),
    #[error("The S.No column cannot be changed.")]
    SerialColumn,
    #[error("Column '{0}' does not hold values.")]
    ValuelessColumn(String),
    #[error("Name cannot be empty.")]
    EmptyName,
    #[error("Width {width:.0} is below the minimum of {min:.0}.")]
    WidthTooSmall { width: f32, min: f32 },
    #[error("A ledger must keep at least one page.")]
    LastPage,
}
