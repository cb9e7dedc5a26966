//! Table normalizer: cleaning, header detection, and numeric type inference.
//!
//! Never fails. A table that loses all of its content during cleaning
//! degrades to a single-cell placeholder instead of aborting the conversion.

use std::collections::HashSet;
use tabella_pdf::RawTable;
use tabella_sheet::CellValue;

/// Placeholder column name for diagnostic rows
pub const INFO_COLUMN: &str = "Info";
/// Message for tables that are empty after cleaning
pub const NO_STRUCTURE_MSG: &str = "No structured data in this table";
/// Message for tables that lost all columns during cleaning
pub const NO_USABLE_MSG: &str = "Table contained no usable data";

/// A normalized table, ready to be written as a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    /// Originating page number, 1-based
    pub page: u32,
    /// Table index within the page, 1-based
    pub index: u32,
    /// Unique column names; `Column_<i>` where the source had no header text
    pub columns: Vec<String>,
    /// Data rows, each exactly `columns.len()` wide
    pub rows: Vec<Vec<CellValue>>,
}

fn placeholder(table: &RawTable, message: &str) -> CleanedTable {
    CleanedTable {
        page: table.page,
        index: table.index,
        columns: vec![INFO_COLUMN.to_string()],
        rows: vec![vec![CellValue::Text(message.to_string())]],
    }
}

/// Normalize one raw table.
///
/// Steps, in order: blank stripping and joint empty row/column removal,
/// header detection on the first surviving row, per-column numeric
/// inference, and placeholder substitution whenever nothing usable remains.
pub fn clean_table(table: &RawTable) -> CleanedTable {
    // Trimmed rectangular grid; blank cells become None
    let width = table.rows.iter().map(Vec::len).max().unwrap_or(0);
    let grid: Vec<Vec<Option<String>>> = table
        .rows
        .iter()
        .map(|row| {
            (0..width)
                .map(|c| {
                    row.get(c)
                        .and_then(|cell| cell.as_deref())
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
                .collect()
        })
        .collect();

    // Drop all-empty rows, then columns that are empty across surviving rows
    let kept_rows: Vec<&Vec<Option<String>>> = grid
        .iter()
        .filter(|row| row.iter().any(Option::is_some))
        .collect();
    let kept_cols: Vec<usize> = (0..width)
        .filter(|&c| kept_rows.iter().any(|row| row[c].is_some()))
        .collect();

    if kept_rows.is_empty() || kept_cols.is_empty() {
        return placeholder(table, NO_STRUCTURE_MSG);
    }

    let mut rows: Vec<Vec<Option<String>>> = kept_rows
        .iter()
        .map(|row| kept_cols.iter().map(|&c| row[c].clone()).collect())
        .collect();

    // Header detection: any non-numeric text in the first surviving row
    let header_like = rows[0].iter().flatten().any(|s| !is_numeric_text(s));

    let (columns, data) = if header_like {
        let names: Vec<String> = rows[0]
            .iter()
            .enumerate()
            .map(|(i, c)| match c {
                Some(s) => s.clone(),
                None => format!("Column_{i}"),
            })
            .collect();
        let data = rows.split_off(1);
        if data.is_empty() {
            // The header was the only surviving row. Never return zero rows
            // when the original table had data: fall back to the uncleaned
            // grid with synthetic column names.
            (synthetic_columns(width), grid)
        } else {
            (dedupe_columns(names), data)
        }
    } else {
        (synthetic_columns(kept_cols.len()), rows)
    };

    // A column converts to numeric only if every non-empty cell parses
    let numeric: Vec<bool> = (0..columns.len())
        .map(|c| {
            let mut any_value = false;
            let all_parse = data.iter().all(|row| {
                match row.get(c).and_then(|cell| cell.as_deref()) {
                    Some(s) => {
                        any_value = true;
                        parse_number(s).is_some()
                    }
                    None => true,
                }
            });
            any_value && all_parse
        })
        .collect();

    let typed: Vec<Vec<CellValue>> = data
        .iter()
        .map(|row| {
            (0..columns.len())
                .map(|c| match row.get(c).and_then(|cell| cell.as_deref()) {
                    None => CellValue::Empty,
                    Some(s) => match (numeric[c], parse_number(s)) {
                        (true, Some(n)) => CellValue::Number(n),
                        _ => CellValue::Text(s.to_string()),
                    },
                })
                .collect()
        })
        .collect();

    if columns.is_empty() || typed.is_empty() {
        return placeholder(table, NO_USABLE_MSG);
    }

    CleanedTable {
        page: table.page,
        index: table.index,
        columns,
        rows: typed,
    }
}

/// A cell counts as numeric if, after stripping `.`, `,` and `-`, it
/// consists only of digits.
fn is_numeric_text(s: &str) -> bool {
    let stripped: String = s
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '-'))
        .collect();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit())
}

/// Parse a cell as a number after stripping thousands separators and
/// surrounding whitespace.
fn parse_number(s: &str) -> Option<f64> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn synthetic_columns(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Column_{i}")).collect()
}

/// Disambiguate duplicate column names with `_2`, `_3`, ... suffixes
fn dedupe_columns(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        if seen.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{name}_{n}");
            if seen.insert(candidate.clone()) {
                out.push(candidate);
                break;
            }
            n += 1;
        }
    }
    out
}
