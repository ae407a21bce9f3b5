//! # Appointment Dates
//!
//! Patient appointment scheduling from a start date, a repeating interval
//! and a plus/minus tolerance window.
//!
//! Given the date of the first cycle (C1D1 or randomization), the crate
//! computes a fixed-length series of appointment dates together with their
//! tolerance windows, and encodes the result as a PDF document or an XLSX
//! workbook. An axum server exposes the calculation as a web form and as a
//! JSON API.
//!
//! ## Architecture
//!
//! - [`models`]: Request, appointment and result types
//! - [`scheduler`]: Input parsing and date arithmetic
//! - [`services`]: PDF and spreadsheet report encoding
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use appointment_dates::models::IntervalUnit;
//! use appointment_dates::scheduler::{compute_schedule, parse_start_date};
//!
//! let start = parse_start_date("2024-01-01").unwrap();
//! let schedule = compute_schedule(start, IntervalUnit::Week, 2, 3).unwrap();
//!
//! assert_eq!(schedule.len(), 30);
//! assert_eq!(schedule.entries()[1].on_date.to_string(), "2024-01-15");
//! ```

pub mod config;
pub mod models;
pub mod scheduler;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
