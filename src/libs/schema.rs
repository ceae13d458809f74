//! Header normalization for ingested tables.
//!
//! Report exports routinely carry duplicate column labels (a merged header
//! split over several cells, or simply two columns named `Hours`). Rows are
//! keyed by column name, so the schema must be unique before any other stage
//! runs. This module turns a raw header sequence into a unique,
//! order-preserving schema.

use std::collections::HashMap;

/// Deduplicates a raw header sequence into a unique schema.
///
/// Scans left to right keeping a count per distinct name. The first
/// occurrence of a name is emitted unchanged; every later occurrence is
/// emitted as `"<name> (<n>)"` where `n` is the 1-based occurrence count
/// starting at 2. Blank names are replaced with a positional `Column<N>`
/// placeholder (1-based) before counting, so the output never contains an
/// empty entry.
///
/// Output length always equals input length. The function is pure and total;
/// empty input yields empty output.
///
/// # Examples
///
/// ```rust
/// use declock::libs::schema::normalize_headers;
///
/// let names = vec!["Hours".to_string(), "Hours".to_string(), "Name".to_string()];
/// assert_eq!(normalize_headers(&names), vec!["Hours", "Hours (2)", "Name"]);
/// ```
pub fn normalize_headers(names: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    names
        .iter()
        .enumerate()
        .map(|(position, raw)| {
            let name = if raw.trim().is_empty() {
                format!("Column{}", position + 1)
            } else {
                raw.trim().to_string()
            };

            let count = seen.entry(name.clone()).or_insert(0);
            *count += 1;

            if *count == 1 {
                name
            } else {
                format!("{} ({})", name, count)
            }
        })
        .collect()
}
