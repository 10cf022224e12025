// src/ledger/filter.rs
//! Structured filters and free-text search over ledger entries.
//!
//! Conditions combine with logical AND, and so does the search term.
//! A condition whose column no longer exists does not filter anything.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

use super::cell_input::{coerce_for_comparison, parse_iso_date};
use super::column_definition::ColumnDefinition;
use super::column_type::ColumnType;
use super::entry::{CellValue, Entry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Contains,
    NotContains,
    IsEqual,
    IsNotEqual,
    Gt,
    Lt,
    IsOn,
    IsNotOn,
    IsBefore,
    IsAfter,
}

const TEXT_OPERATORS: [FilterOperator; 4] = [
    FilterOperator::Contains,
    FilterOperator::NotContains,
    FilterOperator::IsEqual,
    FilterOperator::IsNotEqual,
];
const NUMBER_OPERATORS: [FilterOperator; 4] = [
    FilterOperator::IsEqual,
    FilterOperator::IsNotEqual,
    FilterOperator::Gt,
    FilterOperator::Lt,
];
const DATE_OPERATORS: [FilterOperator; 4] = [
    FilterOperator::IsOn,
    FilterOperator::IsNotOn,
    FilterOperator::IsBefore,
    FilterOperator::IsAfter,
];

impl FilterOperator {
    pub fn label(self) -> &'static str {
        match self {
            FilterOperator::Contains => "Contains",
            FilterOperator::NotContains => "Does not contain",
            FilterOperator::IsEqual => "Is equal to",
            FilterOperator::IsNotEqual => "Is not equal to",
            FilterOperator::Gt => "Greater than",
            FilterOperator::Lt => "Less than",
            FilterOperator::IsOn => "Is on",
            FilterOperator::IsNotOn => "Is not on",
            FilterOperator::IsBefore => "Is before",
            FilterOperator::IsAfter => "Is after",
        }
    }

    /// Operators offered for a column type. Action columns fall back to the
    /// text set.
    pub fn for_type(column_type: ColumnType) -> &'static [FilterOperator] {
        match column_type {
            ColumnType::Number => &NUMBER_OPERATORS,
            ColumnType::Date => &DATE_OPERATORS,
            ColumnType::Text | ColumnType::Action => &TEXT_OPERATORS,
        }
    }

    pub fn default_for(column_type: ColumnType) -> FilterOperator {
        Self::for_type(column_type)[0]
    }

    pub fn is_valid_for(self, column_type: ColumnType) -> bool {
        Self::for_type(column_type).contains(&self)
    }
}

/// Right-hand operand of a condition. Comes from a text field, a number
/// field or a date picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl Default for FilterValue {
    fn default() -> Self {
        FilterValue::Text(String::new())
    }
}

impl FilterValue {
    pub fn to_plain_string(&self) -> String {
        match self {
            FilterValue::Number(n) => n.to_string(),
            FilterValue::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub id: String,
    pub column_id: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl FilterCondition {
    pub fn new(column_id: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
        FilterCondition {
            id: format!("filter-{}", Uuid::new_v4().simple()),
            column_id: column_id.into(),
            operator,
            value,
        }
    }

    /// A fresh draft targeting the first value column with its first operator.
    pub fn draft_for(columns: &[ColumnDefinition]) -> Option<Self> {
        let first = columns.iter().find(|c| c.holds_values())?;
        Some(FilterCondition::new(
            first.id.clone(),
            FilterOperator::default_for(first.column_type),
            FilterValue::default(),
        ))
    }

    /// Points the condition at another column, resetting the operator to
    /// that column type's first operator.
    pub fn retarget(&mut self, column: &ColumnDefinition) {
        self.column_id = column.id.clone();
        self.operator = FilterOperator::default_for(column.column_type);
    }

    pub fn matches(&self, entry: &Entry, column: &ColumnDefinition) -> bool {
        let stored = entry.value(&column.id).unwrap_or(&CellValue::Null);
        let operand = self.value.to_plain_string();
        match self.operator {
            FilterOperator::Contains => contains_ci(stored, &operand),
            FilterOperator::NotContains => !contains_ci(stored, &operand),
            FilterOperator::IsEqual if column.column_type == ColumnType::Number => {
                numeric_cmp(stored, &self.value) == Some(Ordering::Equal)
            }
            FilterOperator::IsNotEqual if column.column_type == ColumnType::Number => {
                matches!(numeric_cmp(stored, &self.value), Some(o) if o != Ordering::Equal)
            }
            FilterOperator::IsEqual => equals_ci(stored, &operand),
            FilterOperator::IsNotEqual => !equals_ci(stored, &operand),
            FilterOperator::Gt => numeric_cmp(stored, &self.value) == Some(Ordering::Greater),
            FilterOperator::Lt => numeric_cmp(stored, &self.value) == Some(Ordering::Less),
            FilterOperator::IsOn => stored.to_plain_string() == operand,
            FilterOperator::IsNotOn => stored.to_plain_string() != operand,
            FilterOperator::IsBefore => date_cmp(stored, &operand) == Some(Ordering::Less),
            FilterOperator::IsAfter => date_cmp(stored, &operand) == Some(Ordering::Greater),
        }
    }
}

fn contains_ci(stored: &CellValue, operand: &str) -> bool {
    stored
        .to_plain_string()
        .to_lowercase()
        .contains(&operand.to_lowercase())
}

fn equals_ci(stored: &CellValue, operand: &str) -> bool {
    stored.to_plain_string().to_lowercase() == operand.to_lowercase()
}

/// Empty cells and blank operands count as zero. `None` whenever either
/// side is not a number.
fn numeric_cmp(stored: &CellValue, operand: &FilterValue) -> Option<Ordering> {
    let left = match stored {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => coerce_for_comparison(s),
        CellValue::Null => 0.0,
    };
    let right = match operand {
        FilterValue::Number(n) => *n,
        FilterValue::Text(s) => coerce_for_comparison(s),
    };
    left.partial_cmp(&right)
}

fn date_cmp(stored: &CellValue, operand: &str) -> Option<Ordering> {
    let left = parse_iso_date(&stored.to_plain_string())?;
    let right = parse_iso_date(operand)?;
    Some(left.cmp(&right))
}

/// Entries that satisfy every condition, in their original order.
pub fn evaluate<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    columns: &[ColumnDefinition],
    conditions: &[FilterCondition],
) -> Vec<&'a Entry> {
    let resolved: Vec<(&FilterCondition, &ColumnDefinition)> = conditions
        .iter()
        .filter_map(|cond| {
            columns
                .iter()
                .find(|c| c.id == cond.column_id)
                .map(|col| (cond, col))
        })
        .collect();
    entries
        .into_iter()
        .filter(|entry| resolved.iter().all(|(cond, col)| cond.matches(entry, col)))
        .collect()
}

/// Case-insensitive substring search over every stored field of an entry.
pub fn matches_search(entry: &Entry, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    entry
        .data
        .values()
        .any(|v| v.to_plain_string().to_lowercase().contains(&needle))
}

/// Search first, then structured filters; both must hold.
pub fn visible_entries<'a>(
    entries: &'a [Entry],
    columns: &[ColumnDefinition],
    search: &str,
    conditions: &[FilterCondition],
) -> Vec<&'a Entry> {
    let searched = entries.iter().filter(|e| matches_search(e, search));
    evaluate(searched, columns, conditions)
}

/// Brings conditions back in line with the current columns: conditions on
/// deleted columns are dropped and operators that no longer fit the
/// column type are reset to that type's first operator.
/// Returns true if anything changed.
pub fn reconcile_filters(conditions: &mut Vec<FilterCondition>, columns: &[ColumnDefinition]) -> bool {
    let before = conditions.len();
    conditions.retain(|cond| columns.iter().any(|c| c.id == cond.column_id && c.holds_values()));
    let mut changed = conditions.len() != before;
    for cond in conditions.iter_mut() {
        if let Some(column) = columns.iter().find(|c| c.id == cond.column_id) {
            if !cond.operator.is_valid_for(column.column_type) {
                cond.operator = FilterOperator::default_for(column.column_type);
                changed = true;
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::serial(),
            ColumnDefinition::new("item", "Item", ColumnType::Text, 120.0),
            ColumnDefinition::new("total", "Total", ColumnType::Number, 120.0),
            ColumnDefinition::new("paid", "Paid On", ColumnType::Date, 120.0),
        ]
    }

    fn entry(id: i64, item: &str, total: CellValue, paid: &str) -> Entry {
        let mut data = BTreeMap::new();
        data.insert("item".to_string(), CellValue::from(item));
        data.insert("total".to_string(), total);
        data.insert("paid".to_string(), CellValue::from(paid));
        Entry { id, data }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry(1, "Apple", CellValue::Number(10.0), "2024-03-01"),
            entry(2, "Banana", CellValue::Number(25.5), "2024-03-15"),
            entry(3, "Kiwi", CellValue::Null, "2024-04-02"),
        ]
    }

    fn ids(entries: &[&Entry]) -> Vec<i64> {
        entries.iter().map(|e| e.id).collect()
    }

    fn cond(column: &str, op: FilterOperator, value: FilterValue) -> FilterCondition {
        FilterCondition::new(column, op, value)
    }

    #[test]
    fn no_conditions_is_identity() {
        let entries = sample();
        let result = evaluate(&entries, &columns(), &[]);
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn evaluate_is_idempotent() {
        let entries = sample();
        let conditions = vec![cond("total", FilterOperator::Gt, FilterValue::Number(5.0))];
        let once: Vec<Entry> = evaluate(&entries, &columns(), &conditions)
            .into_iter()
            .cloned()
            .collect();
        let twice = evaluate(&once, &columns(), &conditions);
        assert_eq!(ids(&twice), once.iter().map(|e| e.id).collect::<Vec<_>>());
    }

    #[test]
    fn contains_is_case_insensitive() {
        let entries = sample();
        let conditions = vec![cond("item", FilterOperator::Contains, FilterValue::Text("a".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &conditions)), vec![1, 2]);

        let conditions = vec![cond("item", FilterOperator::NotContains, FilterValue::Text("A".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &conditions)), vec![3]);
    }

    #[test]
    fn text_equality_ignores_case() {
        let entries = sample();
        let conditions = vec![cond("item", FilterOperator::IsEqual, FilterValue::Text("kiwi".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &conditions)), vec![3]);
        let conditions = vec![cond("item", FilterOperator::IsNotEqual, FilterValue::Text("KIWI".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &conditions)), vec![1, 2]);
    }

    #[test]
    fn numeric_comparisons_treat_empty_as_zero() {
        let entries = sample();
        let gt = vec![cond("total", FilterOperator::Gt, FilterValue::Text("10".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &gt)), vec![2]);

        let lt = vec![cond("total", FilterOperator::Lt, FilterValue::Number(5.0))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &lt)), vec![3]);

        let ne = vec![cond("total", FilterOperator::IsNotEqual, FilterValue::Number(10.0))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &ne)), vec![2, 3]);

        let blank = vec![cond("total", FilterOperator::IsEqual, FilterValue::Text("".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &blank)), vec![3]);

        let garbage = vec![cond("total", FilterOperator::Lt, FilterValue::Text("12x".into()))];
        assert!(evaluate(&entries, &columns(), &garbage).is_empty());
    }

    #[test]
    fn date_operators() {
        let entries = sample();
        let on = vec![cond("paid", FilterOperator::IsOn, FilterValue::Text("2024-03-15".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &on)), vec![2]);

        let not_on = vec![cond("paid", FilterOperator::IsNotOn, FilterValue::Text("2024-03-15".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &not_on)), vec![1, 3]);

        let before = vec![cond("paid", FilterOperator::IsBefore, FilterValue::Text("2024-03-15".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &before)), vec![1]);

        let after = vec![cond("paid", FilterOperator::IsAfter, FilterValue::Text("2024-03-01".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &after)), vec![2, 3]);

        let garbage = vec![cond("paid", FilterOperator::IsAfter, FilterValue::Text("soon".into()))];
        assert!(evaluate(&entries, &columns(), &garbage).is_empty());
    }

    #[test]
    fn conditions_on_missing_columns_do_not_filter() {
        let entries = sample();
        let conditions = vec![cond("gone", FilterOperator::Contains, FilterValue::Text("zzz".into()))];
        assert_eq!(ids(&evaluate(&entries, &columns(), &conditions)), vec![1, 2, 3]);
    }

    #[test]
    fn conditions_combine_with_and() {
        let entries = sample();
        let conditions = vec![
            cond("item", FilterOperator::Contains, FilterValue::Text("an".into())),
            cond("total", FilterOperator::Gt, FilterValue::Number(20.0)),
        ];
        assert_eq!(ids(&evaluate(&entries, &columns(), &conditions)), vec![2]);
    }

    #[test]
    fn search_matches_any_field_and_composes_with_filters() {
        let entries = sample();
        assert_eq!(ids(&visible_entries(&entries, &columns(), "25.5", &[])), vec![2]);
        assert_eq!(ids(&visible_entries(&entries, &columns(), "2024-0", &[])), vec![1, 2, 3]);

        let conditions = vec![cond("total", FilterOperator::Lt, FilterValue::Number(20.0))];
        assert_eq!(ids(&visible_entries(&entries, &columns(), "2024-03", &conditions)), vec![1]);
        assert!(visible_entries(&entries, &columns(), "null", &[]).is_empty());
    }

    #[test]
    fn reconcile_resets_stale_operators_and_drops_orphans() {
        let mut cols = columns();
        let mut conditions = vec![
            cond("item", FilterOperator::Contains, FilterValue::Text("a".into())),
            cond("gone", FilterOperator::Contains, FilterValue::Text("a".into())),
        ];
        cols[1].column_type = ColumnType::Number;

        assert!(reconcile_filters(&mut conditions, &cols));
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].operator, FilterOperator::IsEqual);
        assert_eq!(conditions[0].value, FilterValue::Text("a".into()));
        assert!(!reconcile_filters(&mut conditions, &cols));
    }

    #[test]
    fn draft_targets_first_value_column() {
        let draft = FilterCondition::draft_for(&columns()).unwrap();
        assert_eq!(draft.column_id, "item");
        assert_eq!(draft.operator, FilterOperator::Contains);

        let mut draft = draft;
        draft.retarget(&columns()[3]);
        assert_eq!(draft.operator, FilterOperator::IsOn);
    }
}
