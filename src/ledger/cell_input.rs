// src/ledger/cell_input.rs
//! Parsing of raw cell input and the display form of stored values.
//!
//! Numbers and dates typed by the user are sanitized into a representable
//! value instead of being rejected: unparsable numbers become null and
//! unparsable dates become the empty string.

use chrono::{Local, NaiveDate};

use super::column_type::ColumnType;
use super::entry::CellValue;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts a committed edit into the stored value for a column of `column_type`.
pub fn parse_cell_input(column_type: ColumnType, raw: &str) -> CellValue {
    match column_type {
        ColumnType::Number => parse_number_input(raw),
        ColumnType::Date => parse_date_input(raw),
        ColumnType::Text | ColumnType::Action => CellValue::Text(raw.to_string()),
    }
}

/// Keeps only `[0-9.-]`, then reads the longest leading decimal number.
pub fn parse_number_input(raw: &str) -> CellValue {
    let sanitized: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if sanitized.is_empty() || sanitized == "-" {
        return CellValue::Null;
    }
    match parse_float_prefix(&sanitized) {
        Some(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Null,
    }
}

/// Accepts `dd/mm/yyyy` and stores it as `yyyy-mm-dd`.
///
/// Only the component ranges are checked (day 1..=31, month 1..=12,
/// year > 1900); `31/02/2024` is accepted as `2024-02-31`.
pub fn parse_date_input(raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Text(String::new());
    }
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return CellValue::Text(String::new());
    }
    let (Some(day), Some(month), Some(year)) = (
        parse_int_prefix(parts[0]),
        parse_int_prefix(parts[1]),
        parse_int_prefix(parts[2]),
    ) else {
        return CellValue::Text(String::new());
    };
    if (1..=31).contains(&day) && (1..=12).contains(&month) && year > 1900 {
        CellValue::Text(format!("{}-{:02}-{:02}", year, month, day))
    } else {
        CellValue::Text(String::new())
    }
}

/// Converts an existing value when its column becomes a number column.
pub fn coerce_to_number(value: &CellValue) -> CellValue {
    let parsed = match value {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => parse_float_prefix(s),
        CellValue::Null => None,
    };
    match parsed {
        Some(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Null,
    }
}

/// Converts an existing value when its column becomes a text column.
pub fn coerce_to_text(value: &CellValue) -> CellValue {
    CellValue::Text(value.to_plain_string())
}

/// Whole-string numeric coercion used by number filters. Blank input is
/// zero; anything else that is not a number yields NaN, so every
/// comparison against it is false.
pub fn coerce_for_comparison(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(f64::NAN)
}

pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), ISO_DATE_FORMAT).ok()
}

pub fn today_iso() -> String {
    Local::now().date_naive().format(ISO_DATE_FORMAT).to_string()
}

/// Default stored value for a freshly created cell.
pub fn default_value_for(column_type: ColumnType) -> CellValue {
    match column_type {
        ColumnType::Number => CellValue::Null,
        ColumnType::Date => CellValue::Text(today_iso()),
        ColumnType::Text | ColumnType::Action => CellValue::Text(String::new()),
    }
}

/// Text shown in a cell and used as the initial edit draft.
/// ISO dates are shown as `dd/mm/yyyy` so a commit round-trips unchanged.
pub fn display_value(column_type: ColumnType, value: Option<&CellValue>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match (column_type, value) {
        (ColumnType::Date, CellValue::Text(s)) => iso_to_display_date(s),
        _ => value.to_plain_string(),
    }
}

fn iso_to_display_date(iso: &str) -> String {
    let parts: Vec<&str> = iso.split('-').collect();
    match parts.as_slice() {
        [y, m, d] if !y.is_empty() && !m.is_empty() && !d.is_empty() => {
            format!("{}/{}/{}", d, m, y)
        }
        _ => iso.to_string(),
    }
}

/// Reads the longest leading decimal literal (sign, digits, fraction,
/// exponent) after leading whitespace. `"12abc"` reads as 12.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let sign = if s.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }
    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        let mut frac_digits = 0;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            frac_digits += 1;
        }
        if mantissa_digits + frac_digits > 0 {
            end = frac_end;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok()
}

/// Reads a leading base-10 integer after leading whitespace. `"08x"` reads as 8.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse::<i64>().ok()
}
