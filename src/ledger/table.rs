// src/ledger/table.rs
//! The ledger table: ordered columns plus ordered entries.
//!
//! Fields are private. Every structural change goes through the mutator
//! methods below so the entry data keys always mirror the value-holding
//! columns.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::cell_input::{coerce_to_number, coerce_to_text, default_value_for, parse_cell_input};
use super::column_definition::{ColumnDefinition, MIN_COLUMN_WIDTH};
use super::column_type::ColumnType;
use super::entry::{is_placeholder_id, CellValue, Entry, EntryId};
use super::error::LedgerError;

/// Where a new column lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPosition {
    End,
    After(String),
}

/// Describes a mutation that was applied to a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableChange {
    ColumnAdded { column_id: String },
    ColumnDeleted { column_id: String, name: String },
    ColumnRenamed { column_id: String, old_name: String, new_name: String },
    ColumnRetyped { column_id: String, old_type: ColumnType, new_type: ColumnType },
    ColumnResized { column_id: String, width: f32 },
    EntryAdded { entry_id: EntryId },
    EntryDeleted { entry_id: EntryId },
    CellUpdated { entry_id: EntryId, column_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTable {
    columns: Vec<ColumnDefinition>,
    #[serde(default)]
    entries: Vec<Entry>,
}

impl Default for LedgerTable {
    fn default() -> Self {
        LedgerTable {
            columns: vec![ColumnDefinition::serial()],
            entries: Vec::new(),
        }
    }
}

impl LedgerTable {
    /// The layout every new page starts with: S.No, Item, Total Amount.
    pub fn starter(rows: usize) -> Self {
        let mut table = LedgerTable {
            columns: vec![
                ColumnDefinition::serial(),
                ColumnDefinition::new("col-a", "Item", ColumnType::Text, 200.0),
                ColumnDefinition::new("col-c", "Total Amount", ColumnType::Number, 160.0),
            ],
            entries: Vec::new(),
        };
        for _ in 0..rows {
            table.add_entry();
        }
        table
    }

    #[cfg(test)]
    pub fn from_parts(columns: Vec<ColumnDefinition>, entries: Vec<Entry>) -> Self {
        let mut table = LedgerTable { columns, entries };
        table.repair();
        table
    }

    /// Restores the table invariants after deserialization. Returns how
    /// many problems were fixed.
    pub fn repair(&mut self) -> usize {
        let mut fixes = 0;

        let mut seen_columns = HashSet::new();
        let before = self.columns.len();
        self.columns.retain(|c| seen_columns.insert(c.id.clone()));
        fixes += before - self.columns.len();

        match self.columns.iter().position(|c| c.is_serial()) {
            Some(0) => {}
            Some(idx) => {
                let serial = self.columns.remove(idx);
                self.columns.insert(0, serial);
                fixes += 1;
            }
            None => {
                self.columns.insert(0, ColumnDefinition::serial());
                fixes += 1;
            }
        }

        for column in self.columns.iter_mut() {
            if !column.width.is_finite() || column.width < MIN_COLUMN_WIDTH {
                column.width = MIN_COLUMN_WIDTH;
                fixes += 1;
            }
        }

        let mut seen_entries = HashSet::new();
        let before = self.entries.len();
        self.entries
            .retain(|e| !is_placeholder_id(e.id) && seen_entries.insert(e.id));
        fixes += before - self.entries.len();

        let value_columns: HashSet<&str> = self
            .columns
            .iter()
            .filter(|c| c.holds_values())
            .map(|c| c.id.as_str())
            .collect();
        for entry in self.entries.iter_mut() {
            let before = entry.data.len();
            entry.data.retain(|k, _| value_columns.contains(k.as_str()));
            fixes += before - entry.data.len();
        }

        fixes
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn column(&self, column_id: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn entry(&self, entry_id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    /// Ids of the columns a cell cursor can land on, in display order.
    pub fn editable_column_ids(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.holds_values())
            .map(|c| c.id.as_str())
            .collect()
    }

    pub fn next_entry_id(&self) -> EntryId {
        self.entries.iter().map(|e| e.id).max().unwrap_or(0).max(0) + 1
    }

    /// Spreadsheet-style default name (`Column C`, ...) that is not taken yet.
    pub fn next_column_name(&self) -> String {
        let data_columns = self.columns.iter().filter(|c| !c.is_serial()).count();
        let base = format!("Column {}", column_letters(data_columns));
        let mut candidate = base.clone();
        let mut counter = 2;
        while self.columns.iter().any(|c| c.name == candidate) {
            candidate = format!("{} {}", base, counter);
            counter += 1;
        }
        candidate
    }

    pub fn add_column(
        &mut self,
        position: ColumnPosition,
        name: &str,
        column_type: ColumnType,
        width: f32,
    ) -> Result<TableChange, LedgerError> {
        let insert_at = match &position {
            ColumnPosition::End => self.columns.len(),
            ColumnPosition::After(anchor) => {
                self.columns
                    .iter()
                    .position(|c| &c.id == anchor)
                    .ok_or_else(|| LedgerError::UnknownColumn(anchor.clone()))?
                    + 1
            }
        };

        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            self.next_column_name()
        } else {
            trimmed.to_string()
        };

        let mut column_id = generate_column_id();
        while self.column(&column_id).is_some() {
            column_id = generate_column_id();
        }

        let column = ColumnDefinition::new(column_id.clone(), name, column_type, width);
        if column.holds_values() {
            let default = default_value_for(column_type);
            for entry in self.entries.iter_mut() {
                entry.data.insert(column_id.clone(), default.clone());
            }
        }
        self.columns.insert(insert_at, column);

        Ok(TableChange::ColumnAdded { column_id })
    }

    pub fn delete_column(&mut self, column_id: &str) -> Result<TableChange, LedgerError> {
        let idx = self.column_index(column_id)?;
        if self.columns[idx].is_serial() {
            return Err(LedgerError::SerialColumn);
        }
        let removed = self.columns.remove(idx);
        for entry in self.entries.iter_mut() {
            entry.data.remove(column_id);
        }
        Ok(TableChange::ColumnDeleted {
            column_id: removed.id,
            name: removed.name,
        })
    }

    pub fn rename_column(&mut self, column_id: &str, new_name: &str) -> Result<TableChange, LedgerError> {
        let idx = self.column_index(column_id)?;
        if self.columns[idx].is_serial() {
            return Err(LedgerError::SerialColumn);
        }
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        let old_name = std::mem::replace(&mut self.columns[idx].name, trimmed.to_string());
        Ok(TableChange::ColumnRenamed {
            column_id: column_id.to_string(),
            old_name,
            new_name: trimmed.to_string(),
        })
    }

    /// Changes a column's type and coerces every stored value. Date retypes
    /// leave values as they are.
    pub fn retype_column(&mut self, column_id: &str, new_type: ColumnType) -> Result<TableChange, LedgerError> {
        let idx = self.column_index(column_id)?;
        if self.columns[idx].is_serial() {
            return Err(LedgerError::SerialColumn);
        }
        if !new_type.holds_values() {
            return Err(LedgerError::ValuelessColumn(column_id.to_string()));
        }
        let old_type = std::mem::replace(&mut self.columns[idx].column_type, new_type);

        for entry in self.entries.iter_mut() {
            let current = entry.data.get(column_id).cloned().unwrap_or(CellValue::Null);
            let coerced = match new_type {
                ColumnType::Number => coerce_to_number(&current),
                ColumnType::Text => coerce_to_text(&current),
                ColumnType::Date | ColumnType::Action => continue,
            };
            entry.data.insert(column_id.to_string(), coerced);
        }

        Ok(TableChange::ColumnRetyped {
            column_id: column_id.to_string(),
            old_type,
            new_type,
        })
    }

    pub fn resize_column(&mut self, column_id: &str, new_width: f32) -> Result<TableChange, LedgerError> {
        let idx = self.column_index(column_id)?;
        if !new_width.is_finite() || new_width < MIN_COLUMN_WIDTH {
            return Err(LedgerError::WidthTooSmall {
                width: new_width,
                min: MIN_COLUMN_WIDTH,
            });
        }
        self.columns[idx].width = new_width;
        Ok(TableChange::ColumnResized {
            column_id: column_id.to_string(),
            width: new_width,
        })
    }

    /// Appends a row with per-type defaults and returns its id.
    pub fn add_entry(&mut self) -> EntryId {
        let id = self.next_entry_id();
        let data = self
            .columns
            .iter()
            .filter(|c| c.holds_values())
            .map(|c| (c.id.clone(), default_value_for(c.column_type)))
            .collect();
        self.entries.push(Entry { id, data });
        id
    }

    pub fn delete_entry(&mut self, entry_id: EntryId) -> Result<TableChange, LedgerError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or(LedgerError::UnknownEntry(entry_id))?;
        self.entries.remove(idx);
        Ok(TableChange::EntryDeleted { entry_id })
    }

    /// Parses `raw` for the column's type and stores it. `Ok(None)` means the
    /// parsed value equals what was already stored.
    pub fn update_entry_value(
        &mut self,
        entry_id: EntryId,
        column_id: &str,
        raw: &str,
    ) -> Result<Option<TableChange>, LedgerError> {
        let column = self
            .column(column_id)
            .ok_or_else(|| LedgerError::UnknownColumn(column_id.to_string()))?;
        if column.is_serial() {
            return Err(LedgerError::SerialColumn);
        }
        if !column.holds_values() {
            return Err(LedgerError::ValuelessColumn(column_id.to_string()));
        }
        let parsed = parse_cell_input(column.column_type, raw);

        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(LedgerError::UnknownEntry(entry_id))?;
        if entry.data.get(column_id) == Some(&parsed) {
            return Ok(None);
        }
        entry.data.insert(column_id.to_string(), parsed);
        Ok(Some(TableChange::CellUpdated {
            entry_id,
            column_id: column_id.to_string(),
        }))
    }

    fn column_index(&self, column_id: &str) -> Result<usize, LedgerError> {
        self.columns
            .iter()
            .position(|c| c.id == column_id)
            .ok_or_else(|| LedgerError::UnknownColumn(column_id.to_string()))
    }
}

fn generate_column_id() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("col-{}", &uuid[..12])
}

/// 0 -> A, 25 -> Z, 26 -> AA.
fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::column_definition::SERIAL_COLUMN_ID;
    use std::collections::BTreeSet;

    fn key_sets(table: &LedgerTable) -> Vec<BTreeSet<String>> {
        table
            .entries()
            .iter()
            .map(|e| e.data.keys().cloned().collect())
            .collect()
    }

    #[test]
    fn starter_layout_has_serial_item_and_total() {
        let table = LedgerTable::starter(3);
        let names: Vec<_> = table.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["S.No", "Item", "Total Amount"]);
        assert_eq!(table.entries().len(), 3);
        assert_eq!(table.entries()[0].value("col-a"), Some(&CellValue::from("")));
        assert_eq!(table.entries()[0].value("col-c"), Some(&CellValue::Null));
        assert!(table.entries()[0].value(SERIAL_COLUMN_ID).is_none());
    }

    #[test]
    fn add_then_delete_column_restores_key_sets() {
        let mut table = LedgerTable::starter(4);
        table.update_entry_value(2, "col-a", "Rice").unwrap();
        let original = key_sets(&table);

        let TableChange::ColumnAdded { column_id } = table
            .add_column(ColumnPosition::End, "Paid On", ColumnType::Date, 120.0)
            .unwrap()
        else {
            panic!("expected ColumnAdded");
        };
        assert!(table.entries().iter().all(|e| e.data.contains_key(&column_id)));

        table.update_entry_value(1, "col-c", "5").unwrap();
        table.delete_column(&column_id).unwrap();
        assert_eq!(key_sets(&table), original);
    }

    #[test]
    fn add_column_backfills_type_defaults() {
        let mut table = LedgerTable::starter(2);
        let TableChange::ColumnAdded { column_id } = table
            .add_column(ColumnPosition::End, "Qty", ColumnType::Number, 90.0)
            .unwrap()
        else {
            panic!("expected ColumnAdded");
        };
        assert!(table.entries().iter().all(|e| e.value(&column_id) == Some(&CellValue::Null)));
    }

    #[test]
    fn add_column_after_anchor_inserts_in_place() {
        let mut table = LedgerTable::starter(0);
        table
            .add_column(ColumnPosition::After("col-a".into()), "Note", ColumnType::Text, 100.0)
            .unwrap();
        let names: Vec<_> = table.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["S.No", "Item", "Note", "Total Amount"]);
    }

    #[test]
    fn add_column_after_unknown_anchor_is_refused() {
        let mut table = LedgerTable::starter(1);
        let before = table.clone();
        let result = table.add_column(ColumnPosition::After("nope".into()), "X", ColumnType::Text, 100.0);
        assert_eq!(result, Err(LedgerError::UnknownColumn("nope".into())));
        assert_eq!(table, before);
    }

    #[test]
    fn action_columns_do_not_get_values() {
        let mut table = LedgerTable::starter(2);
        let TableChange::ColumnAdded { column_id } = table
            .add_column(ColumnPosition::End, "+", ColumnType::Action, 60.0)
            .unwrap()
        else {
            panic!("expected ColumnAdded");
        };
        assert!(table.entries().iter().all(|e| !e.data.contains_key(&column_id)));
        assert!(!table.editable_column_ids().contains(&column_id.as_str()));
    }

    #[test]
    fn default_column_names_follow_letters() {
        let mut table = LedgerTable::starter(0);
        assert_eq!(table.next_column_name(), "Column C");
        table.add_column(ColumnPosition::End, "", ColumnType::Text, 100.0).unwrap();
        assert_eq!(table.columns().last().unwrap().name, "Column C");
        assert_eq!(table.next_column_name(), "Column D");
        assert_eq!(column_letters(26), "AA");
    }

    #[test]
    fn serial_column_cannot_be_changed() {
        let mut table = LedgerTable::starter(1);
        assert_eq!(table.delete_column(SERIAL_COLUMN_ID), Err(LedgerError::SerialColumn));
        assert_eq!(table.rename_column(SERIAL_COLUMN_ID, "#"), Err(LedgerError::SerialColumn));
        assert_eq!(
            table.retype_column(SERIAL_COLUMN_ID, ColumnType::Number),
            Err(LedgerError::SerialColumn)
        );
        assert_eq!(table.update_entry_value(1, SERIAL_COLUMN_ID, "9"), Err(LedgerError::SerialColumn));
    }

    #[test]
    fn blank_rename_keeps_previous_name() {
        let mut table = LedgerTable::starter(0);
        assert_eq!(table.rename_column("col-a", "   "), Err(LedgerError::EmptyName));
        assert_eq!(table.column("col-a").unwrap().name, "Item");
        table.rename_column("col-a", "  Product ").unwrap();
        assert_eq!(table.column("col-a").unwrap().name, "Product");
    }

    #[test]
    fn retype_to_number_leaves_only_numbers_or_null() {
        let mut table = LedgerTable::starter(4);
        table.update_entry_value(1, "col-a", "12").unwrap();
        table.update_entry_value(2, "col-a", "3.5 kg").unwrap();
        table.update_entry_value(3, "col-a", "n/a").unwrap();

        table.retype_column("col-a", ColumnType::Number).unwrap();
        for entry in table.entries() {
            match entry.value("col-a") {
                Some(CellValue::Number(n)) => assert!(n.is_finite()),
                Some(CellValue::Null) => {}
                other => panic!("unexpected value after retype: {:?}", other),
            }
        }
        assert_eq!(table.entry(1).unwrap().value("col-a"), Some(&CellValue::Number(12.0)));
        assert_eq!(table.entry(2).unwrap().value("col-a"), Some(&CellValue::Number(3.5)));
        assert_eq!(table.entry(3).unwrap().value("col-a"), Some(&CellValue::Null));
    }

    #[test]
    fn retype_to_text_stringifies() {
        let mut table = LedgerTable::starter(2);
        table.update_entry_value(1, "col-c", "40").unwrap();
        table.retype_column("col-c", ColumnType::Text).unwrap();
        assert_eq!(table.entry(1).unwrap().value("col-c"), Some(&CellValue::from("40")));
        assert_eq!(table.entry(2).unwrap().value("col-c"), Some(&CellValue::from("")));
    }

    #[test]
    fn retype_to_date_keeps_values() {
        let mut table = LedgerTable::starter(1);
        table.update_entry_value(1, "col-a", "tomorrow").unwrap();
        table.retype_column("col-a", ColumnType::Date).unwrap();
        assert_eq!(table.entry(1).unwrap().value("col-a"), Some(&CellValue::from("tomorrow")));
    }

    #[test]
    fn resize_refuses_degenerate_widths() {
        let mut table = LedgerTable::starter(0);
        assert!(matches!(
            table.resize_column("col-a", 59.0),
            Err(LedgerError::WidthTooSmall { .. })
        ));
        assert_eq!(table.column("col-a").unwrap().width, 200.0);
        table.resize_column("col-a", 60.0).unwrap();
        assert_eq!(table.column("col-a").unwrap().width, 60.0);
    }

    #[test]
    fn entry_ids_keep_growing_after_deletes() {
        let mut table = LedgerTable::starter(3);
        table.delete_entry(3).unwrap();
        table.delete_entry(1).unwrap();
        assert_eq!(table.add_entry(), 3);
        assert_eq!(table.add_entry(), 4);
        let ids: Vec<_> = table.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn update_unknown_ids_is_refused_without_change() {
        let mut table = LedgerTable::starter(1);
        let before = table.clone();
        assert_eq!(table.update_entry_value(9, "col-a", "x"), Err(LedgerError::UnknownEntry(9)));
        assert_eq!(
            table.update_entry_value(1, "col-zz", "x"),
            Err(LedgerError::UnknownColumn("col-zz".into()))
        );
        assert_eq!(table, before);
    }

    #[test]
    fn unchanged_update_reports_none() {
        let mut table = LedgerTable::starter(1);
        assert!(table.update_entry_value(1, "col-c", "10").unwrap().is_some());
        assert!(table.update_entry_value(1, "col-c", "10.0").unwrap().is_none());
    }

    #[test]
    fn repair_restores_invariants() {
        let columns = vec![
            ColumnDefinition::new("col-a", "Item", ColumnType::Text, 100.0),
            ColumnDefinition::new("col-a", "Dup", ColumnType::Text, 100.0),
        ];
        let mut stale = std::collections::BTreeMap::new();
        stale.insert("col-a".to_string(), CellValue::from("x"));
        stale.insert("col-gone".to_string(), CellValue::from("y"));
        let entries = vec![
            Entry { id: 1, data: stale },
            Entry { id: 1, data: Default::default() },
            Entry { id: -2, data: Default::default() },
        ];
        let table = LedgerTable::from_parts(columns, entries);

        assert!(table.columns()[0].is_serial());
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.entries().len(), 1);
        assert!(!table.entries()[0].data.contains_key("col-gone"));
    }
}
