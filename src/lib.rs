//! # Declock - Decimal-hour export converter
//!
//! A command-line utility for converting tabular time-tracking exports
//! (CSV and Excel workbooks) from decimal hours into clock format.
//!
//! ## Features
//!
//! - **Header Discovery**: Locates the real header row beneath report
//!   preambles and reconciles merged header cells
//! - **Duration Detection**: Flags columns that plausibly hold decimal-hour
//!   data so the operator rarely has to pick columns by hand
//! - **Lossless Conversion**: Replaces values in place or adds derived
//!   columns, leaving every other cell untouched
//! - **Round-trip Formats**: Reads and writes both CSV and XLSX
//! - **Configuration**: Persistent conversion defaults with an interactive
//!   setup wizard
//!
//! ## Usage
//!
//! ```rust,no_run
//! use declock::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
