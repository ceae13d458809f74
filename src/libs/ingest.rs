//! Table ingestion from delimited text and Excel workbooks.
//!
//! Both entry points produce the same output contract, a normalized
//! [`Table`], so everything downstream is format-agnostic. The delimited
//! path is a straightforward parse; the workbook path does the real
//! structural work, because reporting tools embed human-oriented metadata
//! (titles, date ranges, query descriptors) above the actual data table and
//! routinely merge header cells.
//!
//! ## Workbook structure discovery
//!
//! Only the first sheet is considered. Its cells are materialized into an
//! absolute row/column grid with numbers preserved as numbers, then:
//!
//! 1. **Preamble detection.** The first rows are scanned for the marker
//!    substrings reporting tools print above their tables. Enough hits mean
//!    the header row is somewhere below the preamble and has to be searched
//!    for; otherwise row 0 is the header.
//! 2. **Merged-cell reconciliation.** For every merged region intersecting
//!    the header row, only the leftmost column keeps its label; the other
//!    columns of the span are suppressed so a visually merged header does
//!    not produce duplicate or blank names.
//! 3. **Header extraction.** Depending on the active [`HeaderStrategy`],
//!    blank header cells either drop their column entirely or receive a
//!    positional `Column<N>` placeholder.
//! 4. **Missing-data guard.** A retained column whose only populated cell is
//!    its header, while a sibling column carries data rows, aborts the
//!    ingestion. Partial tables are never produced.
//! 5. **Row extraction.** Rows below the header become table rows; fully
//!    empty rows are dropped and numeric-looking strings are coerced.

use crate::libs::error::IngestError;
use crate::libs::schema::normalize_headers;
use crate::libs::table::{coerce_field, CellValue, Row, Table};
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;
use std::ops::RangeInclusive;

/// Marker substrings that identify a report preamble above the data table.
pub const PREAMBLE_MARKERS: &[&str] = &["Time Period", "Executed on", "Query"];

/// Number of leading rows scanned for preamble markers.
pub const MARKER_SCAN_ROWS: usize = 6;

/// Distinct marker hits required to assume a preamble is present.
pub const MIN_MARKER_HITS: usize = 2;

/// Row window searched for the header when a preamble was detected.
pub const HEADER_SEARCH_WINDOW: RangeInclusive<usize> = 3..=14;

/// Minimum populated cells for a row to qualify as the header row.
pub const HEADER_MIN_POPULATED: usize = 5;

/// Minimum share of text cells among a header candidate's populated cells.
pub const HEADER_MIN_TEXT_RATIO: f64 = 0.6;

/// Header row assumed when a preamble was detected but no row in the search
/// window qualified.
pub const FALLBACK_HEADER_ROW: usize = 6;

/// Header discovery strategy for workbook ingestion.
///
/// Two independently useful behaviors exist for imperfect headers. The
/// report-aware strategy handles preambles and merged cells and silently
/// drops blank spacer columns; the positional strategy assumes the table
/// starts at the top and names blank headers `Column<N>` so no data column
/// is ever lost. Report-aware is the default because the exports this tool
/// targets carry preambles more often than not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum HeaderStrategy {
    /// Detect report preambles, honor merged header cells, skip blank
    /// header columns.
    #[default]
    ReportAware,
    /// Take row 0 as the header and synthesize `Column<N>` placeholders for
    /// blank cells.
    Positional,
}

/// Options for the workbook ingestion protocol.
#[derive(Debug, Clone, Default)]
pub struct WorkbookOptions {
    pub strategy: HeaderStrategy,
}

/// A merged cell range of the first sheet, in absolute grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSpan {
    pub first_row: usize,
    pub last_row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl MergeSpan {
    fn covers_row(&self, row: usize) -> bool {
        self.first_row <= row && row <= self.last_row
    }
}

/// Parses delimited text into a normalized table.
///
/// Standard comma-delimited parsing with quoting; blank lines are skipped by
/// the reader and rows whose cells are all empty are dropped afterwards.
/// The header row is required and passes through normalization; data rows
/// are keyed positionally by the normalized schema, with numeric-looking
/// fields coerced to numbers.
pub fn ingest_csv(bytes: &[u8], file_name: &str) -> Result<Table, IngestError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(file_name, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let schema = normalize_headers(&headers);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_error(file_name, e))?;

        let mut row = Row::new();
        for (index, column) in schema.iter().enumerate() {
            row.insert(column.clone(), coerce_field(record.get(index).unwrap_or("")));
        }
        if row.values().any(|value| !value.is_empty()) {
            rows.push(row);
        }
    }

    Ok(Table::new(schema, rows))
}

/// Parses an Excel workbook into a normalized table.
///
/// Reads the first sheet of the workbook as a raw cell grid, collects the
/// sheet's merged regions, and hands both to the grid ingestion described in
/// the module documentation.
pub fn ingest_workbook(bytes: Vec<u8>, file_name: &str, options: &WorkbookOptions) -> Result<Table, IngestError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes)).map_err(|e| parse_error(file_name, e))?;
    workbook.load_merged_regions().map_err(|e| parse_error(file_name, e))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::EmptyWorkbook { file: file_name.to_string() })?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| parse_error(file_name, e))?;
    let grid = materialize_grid(&range);

    let merges: Vec<MergeSpan> = workbook
        .merged_regions()
        .iter()
        .filter(|(sheet, _, _)| sheet == &sheet_name)
        .map(|(_, _, dimensions)| MergeSpan {
            first_row: dimensions.start.0 as usize,
            last_row: dimensions.end.0 as usize,
            first_col: dimensions.start.1 as usize,
            last_col: dimensions.end.1 as usize,
        })
        .collect();

    ingest_grid(grid, &merges, file_name, options)
}

/// Ingests a raw cell grid, the shared back half of the workbook protocol.
///
/// Split out of [`ingest_workbook`] so the structural logic can be exercised
/// without composing workbook binaries.
pub fn ingest_grid(
    grid: Vec<Vec<CellValue>>,
    merges: &[MergeSpan],
    file_name: &str,
    options: &WorkbookOptions,
) -> Result<Table, IngestError> {
    if grid.is_empty() {
        return Ok(Table::new(Vec::new(), Vec::new()));
    }

    let header_row = match options.strategy {
        HeaderStrategy::ReportAware => locate_header_row(&grid),
        HeaderStrategy::Positional => 0,
    };

    // Columns suppressed by merged header cells: everything in a merge span
    // that covers the header row except the span's leftmost column.
    let mut suppressed: Vec<usize> = Vec::new();
    if options.strategy == HeaderStrategy::ReportAware {
        for merge in merges.iter().filter(|m| m.covers_row(header_row)) {
            suppressed.extend(merge.first_col + 1..=merge.last_col);
        }
    }

    // Walk the header row left to right, keeping (original index, label)
    // pairs for the retained columns.
    let mut retained: Vec<usize> = Vec::new();
    let mut labels: Vec<String> = Vec::new();
    for (column, cell) in grid[header_row].iter().enumerate() {
        if suppressed.contains(&column) {
            continue;
        }
        match cell {
            CellValue::Empty => match options.strategy {
                HeaderStrategy::ReportAware => continue,
                HeaderStrategy::Positional => {
                    retained.push(column);
                    labels.push(format!("Column{}", column + 1));
                }
            },
            value => {
                retained.push(column);
                labels.push(value.render().trim().to_string());
            }
        }
    }
    let schema = normalize_headers(&labels);

    missing_data_guard(&grid, &retained, &schema, file_name)?;

    // Rows strictly below the header become table rows. A row with no
    // populated cell anywhere in the sheet is dropped outright.
    let mut rows = Vec::new();
    for grid_row in grid.iter().skip(header_row + 1) {
        if grid_row.iter().all(CellValue::is_empty) {
            continue;
        }
        let mut row = Row::new();
        for (column, name) in retained.iter().zip(&schema) {
            let cell = grid_row.get(*column).cloned().unwrap_or(CellValue::Empty);
            row.insert(name.clone(), cell.coerced());
        }
        rows.push(row);
    }

    Ok(Table::new(schema, rows))
}

/// Locates the header row of a grid that may carry a report preamble.
///
/// When fewer than [`MIN_MARKER_HITS`] distinct markers appear in the first
/// [`MARKER_SCAN_ROWS`] rows, the grid is assumed to start with its header
/// at row 0. Otherwise the search window is scanned for the first row with
/// enough populated, predominantly textual cells; if none qualifies the
/// header defaults to [`FALLBACK_HEADER_ROW`].
fn locate_header_row(grid: &[Vec<CellValue>]) -> usize {
    let marker_hits = PREAMBLE_MARKERS
        .iter()
        .filter(|marker| {
            grid.iter()
                .take(MARKER_SCAN_ROWS)
                .flatten()
                .any(|cell| matches!(cell, CellValue::Text(s) if s.contains(*marker)))
        })
        .count();

    if marker_hits < MIN_MARKER_HITS {
        return 0;
    }

    let last_candidate = (*HEADER_SEARCH_WINDOW.end()).min(grid.len().saturating_sub(1));
    for row in *HEADER_SEARCH_WINDOW.start()..=last_candidate {
        let populated: Vec<&CellValue> = grid[row].iter().filter(|cell| !cell.is_empty()).collect();
        if populated.len() < HEADER_MIN_POPULATED {
            continue;
        }
        let text_cells = populated.iter().filter(|cell| matches!(cell, CellValue::Text(_))).count();
        if text_cells as f64 / populated.len() as f64 >= HEADER_MIN_TEXT_RATIO {
            return row;
        }
    }

    FALLBACK_HEADER_ROW.min(grid.len().saturating_sub(1))
}

/// Fails ingestion when a retained column is populated only at its header.
///
/// Cell population is counted per original column index across the whole
/// sheet. When the best-populated retained column implies data rows exist,
/// any retained column with exactly one populated cell has a header and no
/// data underneath it, which is what uncached workbook formulas look like
/// to a non-evaluating reader.
fn missing_data_guard(grid: &[Vec<CellValue>], retained: &[usize], schema: &[String], file_name: &str) -> Result<(), IngestError> {
    let counts: Vec<usize> = retained
        .iter()
        .map(|column| grid.iter().filter(|row| row.get(*column).is_some_and(|cell| !cell.is_empty())).count())
        .collect();

    let expected = counts.iter().copied().max().unwrap_or(0);
    if expected <= 1 {
        return Ok(());
    }

    let missing: Vec<String> = counts
        .iter()
        .zip(schema)
        .filter(|(count, _)| **count == 1)
        .map(|(_, name)| name.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingData {
            file: file_name.to_string(),
            columns: missing,
        })
    }
}

/// Materializes a worksheet range into an absolute row/column grid.
///
/// Calamine ranges are anchored at their first populated cell; the grid is
/// re-expanded to absolute coordinates so marker rows, merge spans and the
/// fallback header index all line up with what the operator sees in a
/// spreadsheet application.
fn materialize_grid(range: &calamine::Range<Data>) -> Vec<Vec<CellValue>> {
    let Some(end) = range.end() else {
        return Vec::new();
    };
    let start = range.start().unwrap_or((0, 0));

    let height = end.0 as usize + 1;
    let width = end.1 as usize + 1;
    let mut grid = vec![vec![CellValue::Empty; width]; height];

    for (row_offset, row) in range.rows().enumerate() {
        for (col_offset, cell) in row.iter().enumerate() {
            grid[start.0 as usize + row_offset][start.1 as usize + col_offset] = cell_from_data(cell);
        }
    }
    grid
}

/// Converts one calamine cell into the pipeline cell model.
///
/// Numbers stay numbers (dates included, as their raw serial values) so that
/// decimal-hour cells are never stringified on the way in. Formula error
/// cells keep their display form as text.
fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn parse_error<E>(file_name: &str, source: E) -> IngestError
where
    E: std::error::Error + Send + Sync + 'static,
{
    IngestError::Parse {
        file: file_name.to_string(),
        source: Box::new(source),
    }
}
