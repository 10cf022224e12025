// src/ledger/grid_edit/state.rs
use crate::ledger::column_type::ColumnType;
use crate::ledger::entry::EntryId;

/// An in-progress header drag. Lives only inside `GridEditState::ResizingColumn`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    pub column_id: String,
    pub start_x: f32,
    pub start_width: f32,
}

impl ResizeDrag {
    pub fn width_at(&self, pointer_x: f32) -> f32 {
        self.start_width + (pointer_x - self.start_x)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GridEditState {
    #[default]
    Idle,
    EditingCell {
        entry_id: EntryId,
        column_id: String,
        draft: String,
    },
    EditingHeader {
        column_id: String,
        draft: String,
    },
    ChoosingColumnType {
        column_id: String,
        highlighted: usize,
    },
    ResizingColumn(ResizeDrag),
}

impl GridEditState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GridEditState::Idle)
    }

    pub fn editing_cell(&self) -> Option<(EntryId, &str)> {
        match self {
            GridEditState::EditingCell { entry_id, column_id, .. } => Some((*entry_id, column_id.as_str())),
            _ => None,
        }
    }

    pub fn editing_header(&self) -> Option<&str> {
        match self {
            GridEditState::EditingHeader { column_id, .. } => Some(column_id.as_str()),
            _ => None,
        }
    }

    pub fn type_menu_column(&self) -> Option<&str> {
        match self {
            GridEditState::ChoosingColumnType { column_id, .. } => Some(column_id.as_str()),
            _ => None,
        }
    }

    pub fn resizing_column(&self) -> Option<&str> {
        match self {
            GridEditState::ResizingColumn(drag) => Some(drag.column_id.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKey {
    Enter,
    Tab,
    ShiftTab,
    Escape,
    ArrowUp,
    ArrowDown,
}

/// Raw user input the grid reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum GridInput {
    CellClicked { entry_id: EntryId, column_id: String },
    HeaderClicked { column_id: String },
    TypeMenuToggled { column_id: String },
    TypeHighlighted(usize),
    TypeChosen(ColumnType),
    DeleteColumnChosen,
    Key(GridKey),
    Blur,
    ResizeStarted { column_id: String, pointer_x: f32 },
    PointerMoved { pointer_x: f32 },
    PointerReleased,
}
