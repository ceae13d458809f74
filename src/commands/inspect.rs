//! File inspection command.
//!
//! Ingests the given files without converting anything and shows what the
//! pipeline found: the normalized schema, the columns the duration detector
//! flagged, and a sample value per column. Useful for checking how an
//! export will be interpreted before running a conversion, especially for
//! workbooks with report preambles.

use crate::{
    libs::{
        config::Config,
        ingest::{HeaderStrategy, WorkbookOptions},
        messages::Message,
        pipeline::{self, IngestOptions, SilentProgress},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Command-line arguments for the inspect command.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Files to inspect (.csv or .xlsx)
    files: Vec<PathBuf>,

    /// Emit machine-readable JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Header discovery strategy for workbooks
    #[arg(long, value_enum, default_value = "report-aware")]
    strategy: HeaderStrategy,
}

/// Executes the inspect command.
///
/// The whole batch is ingested together; one unreadable file fails the
/// inspection, exactly as it would fail a conversion.
pub async fn cmd(args: InspectArgs) -> Result<()> {
    if args.files.is_empty() {
        msg_bail_anyhow!(Message::NoFilesProvided);
    }

    let defaults = Config::read()?.convert_defaults();
    let options = IngestOptions {
        workbook: WorkbookOptions { strategy: args.strategy },
        extra_keywords: defaults.extra_keywords,
    };

    let payloads = super::read_files(&args.files).await?;
    let ingested = pipeline::ingest_batch(payloads, options, &SilentProgress).await?;

    if args.json {
        let report: Vec<serde_json::Value> = ingested
            .iter()
            .map(|file| {
                serde_json::json!({
                    "file": file.file_name,
                    "schema": file.table.schema,
                    "suggested": file.suggested,
                    "rows": file.table.rows.len(),
                    "sample": file.table.rows.first(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for file in &ingested {
        msg_print!(Message::InspectHeader(file.file_name.clone()), true);
        msg_info!(Message::FileIngested(
            file.file_name.clone(),
            file.table.rows.len(),
            file.table.schema.len()
        ));
        if file.suggested.is_empty() {
            msg_warning!(Message::NoDurationColumnsDetected(file.file_name.clone()));
        }
        View::schema(file)?;
    }

    Ok(())
}
