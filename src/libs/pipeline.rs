//! Batch orchestration for the conversion pipeline.
//!
//! Ties the per-file stages together: extension dispatch, ingestion with
//! duration detection, conversion, serialization and output naming. The
//! stages themselves are synchronous and pure; the only asynchronous entry
//! point is [`ingest_batch`], which dispatches one ingestion task per file
//! and joins them so a batch either ingests completely or fails as a whole.
//!
//! ## Ordering guarantees
//!
//! Conversion and serialization run strictly one file at a time, in the
//! order the files were submitted. Stage transitions are reported through a
//! [`ProgressObserver`] owned by the caller, so per-file progress can be
//! attributed unambiguously without any shared state inside the pipeline.
//! A failure anywhere aborts the remaining batch; there is no retry and no
//! partial output.

use crate::libs::clock::ClockFormat;
use crate::libs::converter::{self, ConversionSelection};
use crate::libs::detector;
use crate::libs::error::IngestError;
use crate::libs::ingest::{ingest_csv, ingest_workbook, WorkbookOptions};
use crate::libs::serializer;
use crate::libs::table::Table;
use anyhow::Result;
use std::path::Path;

/// Suffix inserted before the extension of every output file name.
pub const OUTPUT_SUFFIX: &str = "_converted";

/// Supported input formats, dispatched by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Workbook,
}

impl FileKind {
    /// Dispatches a file name to its ingestion protocol.
    ///
    /// The extension comparison is case-insensitive. Anything that is not
    /// `.csv` or `.xlsx` fails fast, before any bytes are inspected.
    pub fn from_file_name(file_name: &str) -> Result<Self, IngestError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(FileKind::Csv),
            Some("xlsx") => Ok(FileKind::Workbook),
            _ => Err(IngestError::UnsupportedFileType { file: file_name.to_string() }),
        }
    }
}

/// Per-file pipeline stages, reported to the progress observer in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStage {
    Queued,
    Ingesting,
    Converting,
    Serializing,
    Done,
}

impl FileStage {
    pub fn label(&self) -> &'static str {
        match self {
            FileStage::Queued => "queued",
            FileStage::Ingesting => "ingesting",
            FileStage::Converting => "converting",
            FileStage::Serializing => "serializing",
            FileStage::Done => "done",
        }
    }
}

/// Callback seam for per-file progress reporting.
///
/// The pipeline invokes this after each stage transition. Implementations
/// live at the command layer; the core never keeps progress state of its
/// own.
pub trait ProgressObserver {
    fn stage_changed(&self, file_name: &str, stage: FileStage);
}

/// Observer that reports nothing.
pub struct SilentProgress;

impl ProgressObserver for SilentProgress {
    fn stage_changed(&self, _file_name: &str, _stage: FileStage) {}
}

/// Options shared by every file of one ingestion batch.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Workbook header discovery options.
    pub workbook: WorkbookOptions,
    /// User-configured keywords added to the detector's built-in set.
    pub extra_keywords: Vec<String>,
}

/// One successfully ingested file, ready for column selection.
#[derive(Debug, Clone)]
pub struct IngestedFile {
    pub file_name: String,
    pub kind: FileKind,
    pub table: Table,
    /// Columns the detector flagged as duration-like, in schema order.
    pub suggested: Vec<String>,
}

/// One converted file, ready to be written out.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    /// Output file name, derived from the input name.
    pub file_name: String,
    pub payload: OutputPayload,
    pub converted_cells: usize,
}

/// Serialized output in the shape of its format.
#[derive(Debug, Clone)]
pub enum OutputPayload {
    Text(String),
    Binary(Vec<u8>),
}

impl OutputPayload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            OutputPayload::Text(s) => s.as_bytes(),
            OutputPayload::Binary(b) => b,
        }
    }
}

/// Ingests a single file: dispatch, parse, detect.
pub fn ingest_file(file_name: &str, bytes: Vec<u8>, options: &IngestOptions) -> Result<IngestedFile, IngestError> {
    let kind = FileKind::from_file_name(file_name)?;

    let table = match kind {
        FileKind::Csv => ingest_csv(&bytes, file_name)?,
        FileKind::Workbook => ingest_workbook(bytes, file_name, &options.workbook)?,
    };

    let suggested = detector::detect_with_keywords(&table, &options.extra_keywords);

    Ok(IngestedFile {
        file_name: file_name.to_string(),
        kind,
        table,
        suggested,
    })
}

/// Ingests a whole batch, dispatching the files in parallel and joining.
///
/// Results come back in submission order. The batch is all-or-nothing: the
/// first failure is returned and no file proceeds to column selection.
pub async fn ingest_batch(
    files: Vec<(String, Vec<u8>)>,
    options: IngestOptions,
    observer: &(dyn ProgressObserver + Sync),
) -> Result<Vec<IngestedFile>, IngestError> {
    let mut handles = Vec::with_capacity(files.len());
    for (file_name, bytes) in files {
        observer.stage_changed(&file_name, FileStage::Ingesting);
        let options = options.clone();
        let task_name = file_name.clone();
        handles.push((
            file_name,
            tokio::spawn(async move { ingest_file(&task_name, bytes, &options) }),
        ));
    }

    let mut ingested = Vec::with_capacity(handles.len());
    for (file_name, handle) in handles {
        let joined = handle.await.map_err(|e| IngestError::Parse {
            file: file_name,
            source: Box::new(e),
        })?;
        ingested.push(joined?);
    }
    Ok(ingested)
}

/// Converts and serializes one ingested file.
///
/// Consumes the ingested table (each file's table is exclusively owned by
/// its pipeline invocation) and produces the serialized output together
/// with its derived output file name.
pub fn convert_file(
    mut ingested: IngestedFile,
    selection: &ConversionSelection,
    format: ClockFormat,
    observer: &dyn ProgressObserver,
) -> Result<ConvertedFile> {
    observer.stage_changed(&ingested.file_name, FileStage::Converting);
    let outcome = converter::apply(&mut ingested.table, selection, format)?;

    observer.stage_changed(&ingested.file_name, FileStage::Serializing);
    let payload = match ingested.kind {
        FileKind::Csv => OutputPayload::Text(serializer::to_csv_string(&ingested.table)?),
        FileKind::Workbook => OutputPayload::Binary(serializer::to_workbook_bytes(&ingested.table)?),
    };

    observer.stage_changed(&ingested.file_name, FileStage::Done);
    Ok(ConvertedFile {
        file_name: output_file_name(&ingested.file_name),
        payload,
        converted_cells: outcome.converted_cells,
    })
}

/// Derives the output file name from the input name.
///
/// `timesheet.xlsx` becomes `timesheet_converted.xlsx`; a name without an
/// extension gets the suffix appended.
pub fn output_file_name(input: &str) -> String {
    match input.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => format!("{}{}.{}", stem, OUTPUT_SUFFIX, extension),
        _ => format!("{}{}", input, OUTPUT_SUFFIX),
    }
}
