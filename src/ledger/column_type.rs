// src/ledger/column_type.rs
use serde::{
    de::{self, Deserializer},
    Deserialize, Serialize,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    /// UI-only column (e.g. an "add row" button strip). Holds no cell values.
    Action,
}

impl ColumnType {
    /// Types a user can pick from the column type menu, in menu order.
    pub const SELECTABLE: [ColumnType; 3] = [ColumnType::Text, ColumnType::Number, ColumnType::Date];

    pub fn label(self) -> &'static str {
        match self {
            ColumnType::Text => "Text",
            ColumnType::Number => "Number",
            ColumnType::Date => "Date",
            ColumnType::Action => "Action",
        }
    }

    pub fn holds_values(self) -> bool {
        !matches!(self, ColumnType::Action)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Accepts the lowercase wire names plus a few spellings older snapshots used.
impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_column_type(&raw)
            .ok_or_else(|| de::Error::custom(format!("Unknown column type '{}'", raw)))
    }
}

pub fn parse_column_type(s: &str) -> Option<ColumnType> {
    match s.trim() {
        "text" | "Text" | "string" | "String" => Some(ColumnType::Text),
        "number" | "Number" | "float" | "Float" | "F64" | "f64" => Some(ColumnType::Number),
        "date" | "Date" => Some(ColumnType::Date),
        "action" | "Action" => Some(ColumnType::Action),
        _ => None,
    }
}
