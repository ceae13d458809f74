//! Typed failure modes of the ingestion pipeline.
//!
//! Ingestion is the only stage with structured error kinds of its own; the
//! command layer wraps everything else in `anyhow`. All ingestion errors are
//! terminal for the batch that produced them: there is no retry and no
//! partial table output.

use thiserror::Error;

/// A failure while turning raw file bytes into a normalized table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file extension matches neither supported input format.
    #[error("unsupported file type: '{file}' (expected .csv or .xlsx)")]
    UnsupportedFileType { file: String },

    /// The raw bytes were structurally unreadable for their format.
    #[error("failed to parse '{file}': {source}")]
    Parse {
        file: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// One or more workbook columns carry a header cell and nothing else
    /// while sibling columns have data rows.
    ///
    /// This is the signature of formulas whose results were never cached:
    /// a non-evaluating reader sees only blank cells. The message tells the
    /// operator how to repair the source instead of producing a partial
    /// table.
    #[error(
        "'{file}' has columns with no data below the header: {columns}. \
         The workbook most likely contains formulas whose results were not cached. \
         Open it in a spreadsheet application, save it again so formula results are stored, \
         and convert the saved copy.",
        columns = .columns.join(", ")
    )]
    MissingData { file: String, columns: Vec<String> },

    /// The workbook has no sheets, or the first sheet cannot be read.
    #[error("'{file}' contains no readable worksheet")]
    EmptyWorkbook { file: String },
}

impl IngestError {
    /// The name of the file the error belongs to.
    pub fn file_name(&self) -> &str {
        match self {
            IngestError::UnsupportedFileType { file }
            | IngestError::Parse { file, .. }
            | IngestError::MissingData { file, .. }
            | IngestError::EmptyWorkbook { file } => file,
        }
    }
}
