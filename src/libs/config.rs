//! Configuration management for the declock application.
//!
//! Stores the operator's conversion defaults so repeated batches do not need
//! the same flags every time. Configuration lives as JSON in the platform
//! application-data directory and is loaded tolerantly: a missing file means
//! defaults, never an error.
//!
//! ## Settings
//!
//! - **keep_original**: whether conversions add derived columns instead of
//!   replacing values in place
//! - **clock_format**: `hh:mm` or `hh:mm:ss` rendering for converted cells
//! - **extra_keywords**: additional substrings the duration detector should
//!   treat as duration-like column names
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\declock\config.json`
//! - **macOS**: `~/Library/Application Support/declock/config.json`
//! - **Linux**: `~/.local/share/declock/config.json`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use declock::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! let defaults = config.convert_defaults();
//! # Ok(())
//! # }
//! ```

use crate::libs::clock::ClockFormat;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Conversion defaults applied when the matching flags are absent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConvertConfig {
    /// Add derived `<column>_hhmm` columns instead of replacing values.
    pub keep_original: bool,

    /// Clock rendering for converted cells.
    pub clock_format: ClockFormat,

    /// Substrings added to the detector's built-in keyword set.
    ///
    /// Useful for exports with localized or company-specific column names
    /// the built-in list cannot know about.
    pub extra_keywords: Vec<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            keep_original: false,
            clock_format: ClockFormat::HoursMinutes,
            extra_keywords: Vec::new(),
        }
    }
}

/// Root configuration object.
///
/// Each section is optional so the tool runs without any setup; missing
/// sections fall back to their defaults.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convert: Option<ConvertConfig>,
}

impl Config {
    /// Reads configuration from the filesystem.
    ///
    /// A missing configuration file yields the default configuration; a
    /// present but unreadable or unparsable file is an error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Deletes the configuration file if one exists.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        } else {
            msg_info!(Message::ConfigNotFound);
        }
        Ok(())
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Starts from the current configuration so re-running the wizard edits
    /// rather than resets. Returns the updated configuration for saving.
    pub fn init() -> Result<Config> {
        let mut config = Config::read()?;
        let theme = ColorfulTheme::default();
        let current = config.convert_defaults();

        let keep_original = Confirm::with_theme(&theme)
            .with_prompt(Message::PromptKeepOriginal.to_string())
            .default(current.keep_original)
            .interact()?;

        let formats = ["hh:mm", "hh:mm:ss"];
        let format_index = Select::with_theme(&theme)
            .with_prompt(Message::PromptClockFormat.to_string())
            .items(&formats)
            .default(match current.clock_format {
                ClockFormat::HoursMinutes => 0,
                ClockFormat::HoursMinutesSeconds => 1,
            })
            .interact()?;
        let clock_format = if format_index == 1 {
            ClockFormat::HoursMinutesSeconds
        } else {
            ClockFormat::HoursMinutes
        };

        let keywords_raw: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptExtraKeywords.to_string())
            .allow_empty(true)
            .with_initial_text(current.extra_keywords.join(", "))
            .interact_text()?;
        let extra_keywords: Vec<String> = keywords_raw
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect();

        config.convert = Some(ConvertConfig {
            keep_original,
            clock_format,
            extra_keywords,
        });
        Ok(config)
    }

    /// The effective conversion defaults, configured or built in.
    pub fn convert_defaults(&self) -> ConvertConfig {
        self.convert.clone().unwrap_or_default()
    }
}
