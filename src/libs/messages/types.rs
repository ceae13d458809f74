//! Central registry of user-facing messages.
//!
//! Every string the application prints flows through this enum, keeping
//! wording in one place and making message parameters type-checked at the
//! call site. The matching text lives in the `Display` implementation in
//! [`super::display`].

#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    PromptKeepOriginal,
    PromptClockFormat,
    PromptExtraKeywords,

    // === INGESTION MESSAGES ===
    IngestingFiles(usize),
    FileIngested(String, usize, usize), // file, rows, columns
    NoFilesProvided,
    FileReadFailed(String, String), // path, cause

    // === DETECTION MESSAGES ===
    SuggestedColumns(String, String), // file, joined column list
    NoDurationColumnsDetected(String),

    // === CONVERSION MESSAGES ===
    SelectColumnsPrompt(String),
    NoColumnsSelected(String),
    UnknownColumns(String, String), // joined column list, file
    ConvertingFile(String),
    FileConverted(String, usize), // file, converted cell count
    OutputWritten(String),
    FileWriteFailed(String, String), // path, cause
    BatchCompleted(usize),
    InvalidNumericValue(String),

    // === INSPECTION MESSAGES ===
    InspectHeader(String),
}
