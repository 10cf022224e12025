// src/ledger/entry.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Row identifier. Persisted rows are strictly positive; zero and negative
/// ids mark placeholder rows that only exist in the displayed grid.
pub type EntryId = i64;

pub fn is_placeholder_id(id: EntryId) -> bool {
    id <= 0
}

/// A single stored cell scalar. Serialized as a bare JSON number, string or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Null,
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Plain string form used for search, text filters and text retypes.
    /// Null renders as the empty string.
    pub fn to_plain_string(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Null => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    #[serde(default)]
    pub data: BTreeMap<String, CellValue>,
}

impl Entry {
    pub fn value(&self, column_id: &str) -> Option<&CellValue> {
        self.data.get(column_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_values_round_trip_as_bare_json() {
        let mut data = BTreeMap::new();
        data.insert("col-a".to_string(), CellValue::from("Rice"));
        data.insert("col-c".to_string(), CellValue::Number(12.5));
        data.insert("col-d".to_string(), CellValue::Null);
        let entry = Entry { id: 3, data };

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"data":{"col-a":"Rice","col-c":12.5,"col-d":null}}"#
        );
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn plain_string_of_whole_numbers_has_no_fraction() {
        assert_eq!(CellValue::Number(10.0).to_plain_string(), "10");
        assert_eq!(CellValue::Number(2.5).to_plain_string(), "2.5");
        assert_eq!(CellValue::Null.to_plain_string(), "");
    }

    #[test]
    fn placeholder_ids_are_non_positive() {
        assert!(is_placeholder_id(0));
        assert!(is_placeholder_id(-4));
        assert!(!is_placeholder_id(1));
    }
}
