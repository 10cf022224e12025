// src/ledger/footer.rs
use super::column_definition::ColumnDefinition;
use super::column_type::ColumnType;
use super::entry::Entry;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTotal {
    pub column_id: String,
    pub name: String,
    pub total: f64,
}

/// Sum of every number column over the given entries. Only genuine numbers
/// count; nulls and strings contribute nothing.
pub fn column_totals<'a>(
    columns: &[ColumnDefinition],
    entries: impl IntoIterator<Item = &'a Entry> + Clone,
) -> Vec<ColumnTotal> {
    columns
        .iter()
        .filter(|c| c.column_type == ColumnType::Number && !c.is_serial())
        .map(|column| {
            let total = entries
                .clone()
                .into_iter()
                .filter_map(|e| e.value(&column.id).and_then(|v| v.as_number()))
                .sum();
            ColumnTotal {
                column_id: column.id.clone(),
                name: column.name.clone(),
                total,
            }
        })
        .collect()
}

/// At most two fraction digits, trailing zeros dropped, thousands grouped.
pub fn format_total(total: f64) -> String {
    if !total.is_finite() {
        return total.to_string();
    }
    let fixed = format!("{:.2}", total);
    let fixed = fixed.trim_end_matches('0').trim_end_matches('.');
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0" after rounding a tiny negative value
    let sign = if grouped == "0" && frac_part.is_none() { "" } else { sign };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::entry::CellValue;
    use std::collections::BTreeMap;

    fn row(id: i64, item: &str, total: CellValue) -> Entry {
        let mut data = BTreeMap::new();
        data.insert("item".to_string(), CellValue::from(item));
        data.insert("total".to_string(), total);
        Entry { id, data }
    }

    fn columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::serial(),
            ColumnDefinition::new("item", "Item", ColumnType::Text, 120.0),
            ColumnDefinition::new("total", "Total", ColumnType::Number, 120.0),
        ]
    }

    #[test]
    fn nulls_do_not_contribute() {
        let entries = vec![
            row(1, "A", CellValue::Number(10.0)),
            row(2, "B", CellValue::Null),
        ];
        let totals = column_totals(&columns(), &entries);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].name, "Total");
        assert_eq!(totals[0].total, 10.0);
    }

    #[test]
    fn stray_strings_in_number_columns_are_ignored() {
        let entries = vec![
            row(1, "A", CellValue::from("12")),
            row(2, "B", CellValue::Number(2.5)),
        ];
        assert_eq!(column_totals(&columns(), &entries)[0].total, 2.5);
    }

    #[test]
    fn no_number_columns_means_no_totals() {
        let cols = vec![
            ColumnDefinition::serial(),
            ColumnDefinition::new("item", "Item", ColumnType::Text, 120.0),
        ];
        assert!(column_totals(&cols, &[row(1, "A", CellValue::Null)]).is_empty());
    }

    #[test]
    fn totals_follow_the_entries_given() {
        let entries = vec![
            row(1, "A", CellValue::Number(10.0)),
            row(2, "B", CellValue::Number(5.0)),
        ];
        let visible: Vec<&Entry> = entries.iter().filter(|e| e.id == 2).collect();
        assert_eq!(column_totals(&columns(), visible.iter().copied())[0].total, 5.0);
    }

    #[test]
    fn formats_with_grouping_and_two_decimals() {
        assert_eq!(format_total(1234.5), "1,234.5");
        assert_eq!(format_total(1234567.891), "1,234,567.89");
        assert_eq!(format_total(10.0), "10");
        assert_eq!(format_total(0.0), "0");
        assert_eq!(format_total(-999.999), "-1,000");
        assert_eq!(format_total(-0.001), "0");
        assert_eq!(format_total(100.0), "100");
    }
}
