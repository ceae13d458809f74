//! Decimal-hour to clock-format conversion.
//!
//! This module is the numeric heart of the converter: it turns a duration
//! expressed as a real number of hours (`7.5`) into a zero-padded clock
//! string (`"07:30"`). It is used by the column converter for every cell it
//! rewrites and by the console views when presenting samples.
//!
//! ## Format Specifications
//!
//! Two renderings are supported, selected by [`ClockFormat`]:
//!
//! - `hh:mm` rounds the magnitude to whole minutes
//! - `hh:mm:ss` rounds the magnitude to whole seconds
//!
//! In both cases hours and minutes (and seconds) are zero-padded to two
//! digits, hours grow beyond two digits when needed, and negative durations
//! carry a single leading `-`.
//!
//! ## Rounding
//!
//! Rounding happens on the total minute (or second) count before it is split
//! into fields. A fractional part that rounds up to a full hour therefore
//! rolls into the hour field instead of producing an impossible `01:60`:
//! `1.9999` hours renders as `"02:00"`.
//!
//! ## Examples
//!
//! ```rust
//! use declock::libs::clock::{decimal_to_clock, ClockFormat};
//!
//! assert_eq!(decimal_to_clock(7.5, ClockFormat::HoursMinutes).unwrap(), "07:30");
//! assert_eq!(decimal_to_clock(3.25, ClockFormat::HoursMinutes).unwrap(), "03:15");
//! assert_eq!(decimal_to_clock(-7.5, ClockFormat::HoursMinutes).unwrap(), "-07:30");
//! assert_eq!(decimal_to_clock(0.0, ClockFormat::HoursMinutesSeconds).unwrap(), "00:00:00");
//! ```

use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Clock rendering selected for converted cells.
///
/// The derived-column suffix follows the format so that additive conversions
/// are self-describing in the output schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ClockFormat {
    /// Hours and minutes, e.g. `07:30`.
    #[default]
    #[serde(rename = "hh:mm")]
    #[value(name = "hh:mm")]
    HoursMinutes,

    /// Hours, minutes and seconds, e.g. `07:30:00`.
    #[serde(rename = "hh:mm:ss")]
    #[value(name = "hh:mm:ss")]
    HoursMinutesSeconds,
}

impl ClockFormat {
    /// Suffix appended to a column name when conversion runs in
    /// keep-original mode.
    pub fn derived_suffix(&self) -> &'static str {
        match self {
            ClockFormat::HoursMinutes => "_hhmm",
            ClockFormat::HoursMinutesSeconds => "_hhmmss",
        }
    }
}

/// Converts decimal hours into a clock string.
///
/// The sign is taken from the input, the magnitude is rounded to the
/// precision of the chosen format, and the result is rendered through
/// [`format_duration`] or [`format_duration_with_seconds`].
///
/// # Arguments
///
/// * `hours` - The duration as a real number of hours. May be negative.
/// * `format` - The clock rendering to produce.
///
/// # Returns
///
/// The formatted clock string, or an error for non-finite input. Callers in
/// the conversion pipeline only pass values taken from numeric cells, so the
/// error path guards against malformed workbooks rather than normal data.
pub fn decimal_to_clock(hours: f64, format: ClockFormat) -> Result<String> {
    if !hours.is_finite() {
        return Err(msg_error_anyhow!(Message::InvalidNumericValue(hours.to_string())));
    }

    let sign = if hours < 0.0 { "-" } else { "" };
    let magnitude = hours.abs();

    let rendered = match format {
        ClockFormat::HoursMinutes => {
            let total_minutes = (magnitude * 60.0).round() as i64;
            format_duration(&Duration::minutes(total_minutes))
        }
        ClockFormat::HoursMinutesSeconds => {
            let total_seconds = (magnitude * 3600.0).round() as i64;
            format_duration_with_seconds(&Duration::seconds(total_seconds))
        }
    };

    Ok(format!("{}{}", sign, rendered))
}

/// Formats a `chrono::Duration` into a standardized "HH:MM" string.
///
/// Hours and minutes are zero-padded to two digits; hours grow as needed for
/// large durations. Negative durations are clamped to zero, so sign handling
/// stays with the caller.
///
/// # Examples
///
/// ```rust
/// use declock::libs::clock::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(&Duration::hours(8)), "08:00");
/// assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
/// assert_eq!(format_duration(&Duration::zero()), "00:00");
/// ```
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats a `chrono::Duration` into an "HH:MM:SS" string.
///
/// Same padding and clamping rules as [`format_duration`], with a seconds
/// field appended.
pub fn format_duration_with_seconds(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    let secs = duration.num_seconds() % 60;

    format!("{:02}:{:02}:{:02}", hours.max(0), mins.max(0), secs.max(0))
}
