//! Applies the clock conversion to selected table columns.
//!
//! The converter is the only stage that mutates a table. It walks the
//! selected columns in schema order and rewrites every numeric cell through
//! the clock codec, either in place or into a derived sibling column,
//! depending on the selection's keep-original flag.
//!
//! Cells that are absent, textual or otherwise non-numeric are skipped
//! silently. Column selection is heuristic and operators may include sparse
//! columns, so a skip is policy here, not a failure. The same rule makes a
//! second conversion pass a no-op: converted cells are strings, and strings
//! are never converted again.

use crate::libs::clock::{decimal_to_clock, ClockFormat};
use crate::libs::table::{CellValue, Table};
use anyhow::Result;

/// The operator's choice of what to convert in one file.
///
/// Produced by the column-selection step (flags or interactive picker) and
/// consumed once by [`apply`]. `columns` must be schema members; names that
/// are not are ignored.
#[derive(Debug, Clone)]
pub struct ConversionSelection {
    /// Columns to convert.
    pub columns: Vec<String>,
    /// When set, originals are preserved and converted values land in new
    /// `<column><suffix>` columns appended to the schema.
    pub keep_original: bool,
}

/// What a conversion pass did to a table.
#[derive(Debug, Clone, Default)]
pub struct ConversionOutcome {
    /// Derived column names appended to the schema, in the order their
    /// source columns appear in it. Empty unless keep-original was set.
    pub added_headers: Vec<String>,
    /// Number of cells rewritten or derived.
    pub converted_cells: usize,
}

/// Converts the selected columns of `table` to clock format.
///
/// Selected columns are visited in schema order so that derived columns are
/// appended deterministically. In keep-original mode a derived column is
/// created the first time its source column yields a convertible cell; rows
/// without a numeric value in that column simply get no derived key.
pub fn apply(table: &mut Table, selection: &ConversionSelection, format: ClockFormat) -> Result<ConversionOutcome> {
    let ordered: Vec<String> = table
        .schema
        .iter()
        .filter(|column| selection.columns.contains(*column))
        .cloned()
        .collect();

    let mut outcome = ConversionOutcome::default();

    for column in &ordered {
        for row in &mut table.rows {
            let Some(value) = row.get(column).and_then(CellValue::as_number) else {
                continue;
            };
            if !value.is_finite() {
                continue;
            }

            let clock = decimal_to_clock(value, format)?;
            if selection.keep_original {
                let derived = format!("{}{}", column, format.derived_suffix());
                if !outcome.added_headers.contains(&derived) {
                    outcome.added_headers.push(derived.clone());
                }
                row.insert(derived, CellValue::Text(clock));
            } else {
                row.insert(column.clone(), CellValue::Text(clock));
            }
            outcome.converted_cells += 1;
        }
    }

    for derived in &outcome.added_headers {
        if !table.schema.contains(derived) {
            table.schema.push(derived.clone());
        }
    }
    Ok(outcome)
}
