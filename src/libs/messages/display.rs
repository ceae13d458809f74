//! Display implementation for declock application messages.
//!
//! Converts structured [`Message`] values into the text shown to the
//! operator. Keeping every string here means wording changes never touch
//! call sites, and messages with parameters stay type-safe.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let message = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file found".to_string(),
            Message::PromptKeepOriginal => "Keep original columns and add converted copies?".to_string(),
            Message::PromptClockFormat => "Clock format for converted values".to_string(),
            Message::PromptExtraKeywords => "Extra detector keywords (comma separated, empty for none)".to_string(),

            // === INGESTION MESSAGES ===
            Message::IngestingFiles(count) => format!("Reading {} file(s)", count),
            Message::FileIngested(file, rows, columns) => {
                format!("'{}': {} row(s), {} column(s)", file, rows, columns)
            }
            Message::NoFilesProvided => "No input files provided".to_string(),
            Message::FileReadFailed(path, cause) => format!("Failed to read '{}': {}", path, cause),

            // === DETECTION MESSAGES ===
            Message::SuggestedColumns(file, columns) => {
                format!("'{}': suggested duration columns: {}", file, columns)
            }
            Message::NoDurationColumnsDetected(file) => {
                format!("'{}': no duration-like columns detected", file)
            }

            // === CONVERSION MESSAGES ===
            Message::SelectColumnsPrompt(file) => format!("Select columns to convert in '{}'", file),
            Message::NoColumnsSelected(file) => {
                format!("'{}': no columns selected, file will be copied unchanged", file)
            }
            Message::UnknownColumns(columns, file) => {
                format!("Unknown column(s) {} in '{}'", columns, file)
            }
            Message::ConvertingFile(file) => format!("Converting '{}'", file),
            Message::FileConverted(file, cells) => format!("'{}': {} cell(s) converted", file, cells),
            Message::OutputWritten(path) => format!("Saved {}", path),
            Message::FileWriteFailed(path, cause) => format!("Failed to write '{}': {}", path, cause),
            Message::BatchCompleted(count) => format!("Converted {} file(s)", count),
            Message::InvalidNumericValue(value) => {
                format!("Cannot convert non-finite value '{}' to clock format", value)
            }

            // === INSPECTION MESSAGES ===
            Message::InspectHeader(file) => format!("📄 {}", file),
        };
        write!(f, "{}", message)
    }
}
