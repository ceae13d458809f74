pub mod convert;
pub mod init;
pub mod inspect;

use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Inspect files and show detected duration columns")]
    Inspect(inspect::InspectArgs),
    #[command(about = "Convert decimal-hour columns to clock format")]
    Convert(convert::ConvertArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        // In debug mode user messages are routed through tracing, so a
        // subscriber has to be installed before the first message fires.
        if crate::libs::messages::macros::is_debug_mode() {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        }

        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Inspect(args) => inspect::cmd(args).await,
            Commands::Convert(args) => convert::cmd(args).await,
        }
    }
}

/// Reads every input file into memory, pairing its bare file name with the
/// materialized bytes the ingestion pipeline expects.
pub(crate) async fn read_files(paths: &[PathBuf]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut payloads = Vec::with_capacity(paths.len());
    for path in paths {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| msg_error_anyhow!(Message::FileReadFailed(path.display().to_string(), e.to_string())))?;
        payloads.push((file_name, bytes));
    }
    Ok(payloads)
}
