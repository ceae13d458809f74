//! Heuristic classification of duration columns.
//!
//! Operators rarely want every numeric column converted: exports mix hour
//! totals with employee identifiers, cost figures and percentages. The
//! detector scores each column of an ingested table and flags the ones that
//! plausibly hold decimal-hour data, combining a lexical test on the column
//! name with a numeric profile of the sampled values.
//!
//! The result is advisory only. It pre-selects columns in the interactive
//! picker and backs the `--suggested` flag, and the operator can always
//! override it. False positives and negatives are expected; the thresholds
//! below are named constants precisely so they can be tuned without touching
//! the scan structure.

use crate::libs::table::{CellValue, Table};

/// Substrings that mark a column name as duration-like.
///
/// Matching is case-insensitive and positional (a plain substring test, not
/// a word-boundary match), so `"Total Hours Worked"` matches both `hour`
/// and `worked`.
pub const DURATION_KEYWORDS: &[&str] = &[
    "hour",
    "hrs",
    "time",
    "duration",
    "worked",
    "logged",
    "actual",
    "planned",
    "scheduled",
    "billable",
    "non-billable",
    "productive",
    "non-productive",
    "hours",
];

/// Minimum share of numeric values among a column's non-empty cells.
pub const MIN_NUMERIC_RATIO: f64 = 0.8;

/// Lower bound of the plausible decimal-hour range.
///
/// Together with [`MAX_PLAUSIBLE_HOURS`] this guards against identifier-like
/// and currency-like columns, which tend to live far outside any realistic
/// hour total.
pub const MIN_PLAUSIBLE_HOURS: f64 = -1000.0;

/// Upper bound of the plausible decimal-hour range.
pub const MAX_PLAUSIBLE_HOURS: f64 = 1000.0;

/// Flags the columns of `table` that plausibly hold decimal-hour data.
///
/// Output order matches schema order.
pub fn detect(table: &Table) -> Vec<String> {
    detect_with_keywords(table, &[])
}

/// Like [`detect`], with user-configured keywords added to the built-in set.
///
/// For each column:
///
/// 1. The lower-cased column name is tested against the keyword set.
/// 2. Non-empty values are gathered; a column with none is never suggested.
/// 3. The numeric ratio must reach [`MIN_NUMERIC_RATIO`].
/// 4. The numeric minimum and maximum must fall inside the plausible range.
/// 5. The column is suggested when the name matched a keyword, or when every
///    non-empty value was numeric even without a keyword match.
pub fn detect_with_keywords(table: &Table, extra_keywords: &[String]) -> Vec<String> {
    table
        .schema
        .iter()
        .filter(|column| is_duration_column(table, column, extra_keywords))
        .cloned()
        .collect()
}

fn is_duration_column(table: &Table, column: &str, extra_keywords: &[String]) -> bool {
    let name = column.to_lowercase();
    let has_keyword = DURATION_KEYWORDS.iter().any(|keyword| name.contains(keyword))
        || extra_keywords.iter().any(|keyword| name.contains(&keyword.to_lowercase()));

    let values: Vec<&CellValue> = table.column_values(column).collect();
    if values.is_empty() {
        return false;
    }

    let numbers: Vec<f64> = values.iter().filter_map(|value| value.as_number()).collect();
    let numeric_ratio = numbers.len() as f64 / values.len() as f64;
    if numeric_ratio < MIN_NUMERIC_RATIO {
        return false;
    }

    let min = numbers.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if min < MIN_PLAUSIBLE_HOURS || max > MAX_PLAUSIBLE_HOURS {
        return false;
    }

    has_keyword || numeric_ratio == 1.0
}
