//! Batch conversion command.
//!
//! Drives the full pipeline: read file bytes, ingest the batch in parallel,
//! collect a column selection per file, convert and serialize one file at a
//! time, then write every output. Outputs are deliberately written only
//! after the whole batch has converted, so a failure in the middle of a
//! batch never leaves a partial set of converted files behind.
//!
//! ## Column selection
//!
//! Three mutually layered sources, first match wins:
//!
//! 1. `--columns a,b,c` applies the same explicit list to every file and
//!    fails on names missing from a file's schema
//! 2. `--suggested` takes the detector's suggestions as-is
//! 3. otherwise an interactive picker opens per file, pre-checked with the
//!    detector's suggestions

use crate::{
    libs::{
        clock::ClockFormat,
        config::Config,
        converter::ConversionSelection,
        ingest::{HeaderStrategy, WorkbookOptions},
        messages::Message,
        pipeline::{self, ConvertedFile, FileStage, IngestOptions, IngestedFile, ProgressObserver},
        view::View,
    },
    msg_bail_anyhow, msg_debug, msg_error_anyhow, msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, MultiSelect};
use std::path::PathBuf;

/// Command-line arguments for the convert command.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Files to convert (.csv or .xlsx)
    files: Vec<PathBuf>,

    /// Comma-separated list of columns to convert in every file
    #[arg(short, long)]
    columns: Option<String>,

    /// Convert the detector's suggested columns without prompting
    #[arg(short, long)]
    suggested: bool,

    /// Keep original columns and add converted copies
    #[arg(short, long)]
    keep_original: bool,

    /// Clock format for converted values
    #[arg(short, long, value_enum)]
    format: Option<ClockFormat>,

    /// Header discovery strategy for workbooks
    #[arg(long, value_enum, default_value = "report-aware")]
    strategy: HeaderStrategy,

    /// Directory for output files (defaults to each input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// Reports pipeline stage transitions as debug messages.
struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
    fn stage_changed(&self, file_name: &str, stage: FileStage) {
        msg_debug!(format!("{}: {}", file_name, stage.label()));
    }
}

/// Executes the convert command.
pub async fn cmd(args: ConvertArgs) -> Result<()> {
    if args.files.is_empty() {
        msg_bail_anyhow!(Message::NoFilesProvided);
    }

    let defaults = Config::read()?.convert_defaults();
    let format = args.format.unwrap_or(defaults.clock_format);
    let keep_original = args.keep_original || defaults.keep_original;
    let options = IngestOptions {
        workbook: WorkbookOptions { strategy: args.strategy },
        extra_keywords: defaults.extra_keywords,
    };

    msg_info!(Message::IngestingFiles(args.files.len()));
    let observer = ConsoleProgress;
    let payloads = super::read_files(&args.files).await?;
    for (file_name, _) in &payloads {
        observer.stage_changed(file_name, FileStage::Queued);
    }
    let ingested = pipeline::ingest_batch(payloads, options, &observer).await?;

    // Column selection happens for every file before any conversion starts,
    // so an interactive session is not interrupted by progress output.
    let mut selections = Vec::with_capacity(ingested.len());
    for file in &ingested {
        let columns = select_columns(file, &args)?;
        if columns.is_empty() {
            msg_warning!(Message::NoColumnsSelected(file.file_name.clone()));
        }
        selections.push(ConversionSelection { columns, keep_original });
    }

    // Convert the whole batch up front; outputs are only written once every
    // file has converted.
    let mut converted: Vec<ConvertedFile> = Vec::with_capacity(ingested.len());
    for (file, selection) in ingested.into_iter().zip(&selections) {
        msg_info!(Message::ConvertingFile(file.file_name.clone()));
        converted.push(pipeline::convert_file(file, selection, format, &observer)?);
    }

    if let Some(directory) = &args.output_dir {
        tokio::fs::create_dir_all(directory)
            .await
            .map_err(|e| msg_error_anyhow!(Message::FileWriteFailed(directory.display().to_string(), e.to_string())))?;
    }

    for (output, input) in converted.iter().zip(&args.files) {
        let directory = args
            .output_dir
            .clone()
            .or_else(|| input.parent().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let path = directory.join(&output.file_name);
        tokio::fs::write(&path, output.payload.as_bytes())
            .await
            .map_err(|e| msg_error_anyhow!(Message::FileWriteFailed(path.display().to_string(), e.to_string())))?;
        msg_success!(Message::OutputWritten(path.display().to_string()));
    }

    View::summary(&converted)?;
    msg_success!(Message::BatchCompleted(converted.len()), true);
    Ok(())
}

/// Resolves the column selection for one ingested file.
fn select_columns(file: &IngestedFile, args: &ConvertArgs) -> Result<Vec<String>> {
    if let Some(list) = &args.columns {
        let requested: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|column| !column.is_empty())
            .map(str::to_string)
            .collect();
        let unknown: Vec<String> = requested
            .iter()
            .filter(|column| !file.table.schema.contains(*column))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            msg_bail_anyhow!(Message::UnknownColumns(unknown.join(", "), file.file_name.clone()));
        }
        return Ok(requested);
    }

    if args.suggested {
        return Ok(file.suggested.clone());
    }

    let checked: Vec<bool> = file
        .table
        .schema
        .iter()
        .map(|column| file.suggested.contains(column))
        .collect();
    let picks = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectColumnsPrompt(file.file_name.clone()).to_string())
        .items(&file.table.schema)
        .defaults(&checked)
        .interact()?;
    Ok(picks.into_iter().map(|index| file.table.schema[index].clone()).collect())
}
