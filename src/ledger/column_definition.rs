// src/ledger/column_definition.rs
use serde::{Deserialize, Serialize};

use super::column_type::ColumnType;

/// Id of the synthetic row-number column every table starts with.
pub const SERIAL_COLUMN_ID: &str = "col-sno";
pub const SERIAL_COLUMN_NAME: &str = "S.No";

/// Resizes below this width are refused.
pub const MIN_COLUMN_WIDTH: f32 = 60.0;
pub const DEFAULT_COLUMN_WIDTH: f32 = 120.0;

fn default_width() -> f32 {
    DEFAULT_COLUMN_WIDTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default = "default_width")]
    pub width: f32,
}

impl ColumnDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, column_type: ColumnType, width: f32) -> Self {
        ColumnDefinition {
            id: id.into(),
            name: name.into(),
            column_type,
            width: width.max(MIN_COLUMN_WIDTH),
        }
    }

    pub fn serial() -> Self {
        ColumnDefinition::new(SERIAL_COLUMN_ID, SERIAL_COLUMN_NAME, ColumnType::Text, MIN_COLUMN_WIDTH)
    }

    pub fn is_serial(&self) -> bool {
        self.id == SERIAL_COLUMN_ID
    }

    /// Data columns store a value per entry; S.No and action columns do not.
    pub fn holds_values(&self) -> bool {
        !self.is_serial() && self.column_type.holds_values()
    }
}
