// src/ledger/events.rs
use bevy::prelude::Event;

use super::column_type::ColumnType;
use super::entry::EntryId;
use super::grid_edit::GridInput;
use super::table::ColumnPosition;

/// Sent by the sidebar when the user submits a new page name.
#[derive(Event, Debug, Clone)]
pub struct RequestCreatePage {
    pub name: String,
}

#[derive(Event, Debug, Clone)]
pub struct RequestRenamePage {
    pub page_id: String,
    pub new_name: String,
}

#[derive(Event, Debug, Clone)]
pub struct RequestDeletePage {
    pub page_id: String,
}

/// Explicit page activation. Unknown ids are ignored.
#[derive(Event, Debug, Clone)]
pub struct RequestSetActivePage {
    pub page_id: String,
}

/// `name: None` picks the next spreadsheet-style default name.
#[derive(Event, Debug, Clone)]
pub struct RequestAddColumn {
    pub page_id: String,
    pub position: ColumnPosition,
    pub name: Option<String>,
    pub column_type: ColumnType,
}

#[derive(Event, Debug, Clone)]
pub struct AddEntryRequest {
    pub page_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct RequestDeleteEntries {
    pub page_id: String,
    pub entry_ids: Vec<EntryId>,
}

/// Grid interaction on the active page, fed to the edit-state machine.
#[derive(Event, Debug, Clone)]
pub struct GridInputEvent(pub GridInput);

#[derive(Event, Debug, Clone)]
pub struct LedgerOperationFeedback {
    pub message: String,
    pub is_error: bool,
}

impl LedgerOperationFeedback {
    pub fn info(message: impl Into<String>) -> Self {
        LedgerOperationFeedback {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        LedgerOperationFeedback {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Explicit "Save" from the toolbar. Writes the snapshot even when
/// autosave is off.
#[derive(Event, Debug, Clone)]
pub struct RequestSaveLedger;

/// A page's columns, entries or name changed, or the page set itself did.
/// Drives snapshot saving.
#[derive(Event, Debug, Clone)]
pub struct PageDataModifiedEvent {
    pub page_id: String,
}
