//! Core library modules for the declock application.
//!
//! Serves as the main entry point for all declock library components. The
//! conversion pipeline proper lives in `table`, `schema`, `detector`,
//! `clock`, `ingest`, `converter`, `serializer` and `pipeline`; the
//! remaining modules carry configuration, messaging and console
//! presentation.
//!
//! ## Usage
//!
//! ```rust
//! use declock::libs::clock::{decimal_to_clock, ClockFormat};
//!
//! let clock = decimal_to_clock(7.5, ClockFormat::HoursMinutes).unwrap();
//! assert_eq!(clock, "07:30");
//! ```

pub mod clock;
pub mod config;
pub mod converter;
pub mod data_storage;
pub mod detector;
pub mod error;
pub mod ingest;
pub mod messages;
pub mod pipeline;
pub mod schema;
pub mod serializer;
pub mod table;
pub mod view;
