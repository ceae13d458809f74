//! Tabular data model shared by the ingestion and conversion pipeline.
//!
//! Every supported input format (delimited text, Excel workbooks) is reduced
//! to the same in-memory shape during ingestion: a [`Table`] holding an
//! ordered schema of unique column names and a list of rows keyed by those
//! names. Downstream stages (duration detection, column conversion,
//! serialization) operate exclusively on this model and never see the source
//! format again.
//!
//! ## Cell values
//!
//! Cells are deliberately loose: a cell is either text, a number, or empty.
//! Numeric strings found in text cells are coerced to numbers at ingestion
//! time so that the detector and the clock codec can treat columns uniformly
//! regardless of whether the source stored `7.5` as a number or as the
//! string `"7.5"`.
//!
//! ## Invariants
//!
//! - The schema contains no duplicate names (guaranteed by header
//!   normalization during ingestion).
//! - Every row key is a schema member; rows may omit keys for cells that
//!   were absent in the source.
//! - Rows are never shared between files; each ingestion produces an
//!   exclusively owned table that is consumed by serialization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single cell of a parsed table.
///
/// Serializes untagged so JSON output renders numbers as numbers, text as
/// strings and empty cells as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A numeric cell, either native to the source format or coerced from
    /// a numeric-looking string.
    Number(f64),
    /// A text cell that did not pass the strict numeric test.
    Text(String),
    /// An absent or blank cell.
    Empty,
}

impl CellValue {
    /// Returns `true` for absent or blank cells.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the numeric payload, if this cell holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Upgrades a text cell to a numeric cell when its content passes the
    /// strict numeric-string test. All other values pass through unchanged.
    pub fn coerced(self) -> CellValue {
        match self {
            CellValue::Text(s) => {
                if is_numeric_str(&s) {
                    match s.trim().parse::<f64>() {
                        Ok(n) if n.is_finite() => CellValue::Number(n),
                        _ => CellValue::Text(s),
                    }
                } else {
                    CellValue::Text(s)
                }
            }
            other => other,
        }
    }

    /// Renders the cell for delimited-text output and console display.
    pub fn render(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

/// A single table row: column name to cell value.
pub type Row = HashMap<String, CellValue>;

/// A normalized table produced by ingestion.
///
/// The schema order matches the source column order left to right; the
/// converter may append derived column names at the end when running in
/// keep-original mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Unique, order-preserving column names.
    pub schema: Vec<String>,
    /// Data rows keyed by schema member names.
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(schema: Vec<String>, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    /// Iterates the non-empty values of one column across all rows.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> {
        self.rows.iter().filter_map(move |row| row.get(column)).filter(|value| !value.is_empty())
    }
}

/// Strict numeric-string test used for cell coercion.
///
/// Accepts an optional leading sign followed by digits with at most one
/// decimal point. Exponent notation, infinities and `NaN` spellings are
/// rejected so that identifier-like strings such as `"1e5"` stay textual.
pub fn is_numeric_str(s: &str) -> bool {
    let s = s.trim();
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    if s.is_empty() {
        return false;
    }
    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Converts one raw delimited-text field into a cell value.
///
/// Blank fields become [`CellValue::Empty`] so that sparse columns are
/// counted the same way for delimited and workbook sources. Numeric-looking
/// fields are coerced to numbers; everything else is kept verbatim.
pub fn coerce_field(raw: &str) -> CellValue {
    if raw.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(raw.to_string()).coerced()
    }
}
