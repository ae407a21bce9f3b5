//! Appointment date scheduler.
//!
//! Pure date arithmetic: given a start date, an interval and a tolerance, the
//! scheduler produces a fixed number of appointments, each with a symmetric
//! plus/minus window. Nothing here performs I/O.
//!
//! ```text
//! cycle 1:      on = start
//! cycle k + 1:  on = (on of cycle k) + interval
//!               plus  = on + tolerance days
//!               minus = on − tolerance days
//! ```
//!
//! Month intervals use calendar arithmetic with the day of month clamped to
//! the target month. Each step starts from the previous appointment, so a
//! clamped day carries forward: Jan 31, Feb 29, Mar 29.

mod error;

pub use error::ScheduleError;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{AppointmentEntry, CycleNumber, IntervalUnit, ScheduleResult, DATE_FORMAT};

/// Number of appointments generated per request unless configured otherwise.
pub const DEFAULT_APPOINTMENT_COUNT: u32 = 30;

/// Scheduler policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Length of every generated schedule
    pub appointment_count: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            appointment_count: DEFAULT_APPOINTMENT_COUNT,
        }
    }
}

// =============================================================================
// Input parsing
// =============================================================================

/// Parse a start date written exactly as `YYYY-MM-DD`.
///
/// Surrounding whitespace is ignored. Short forms such as `2024-1-5` are
/// rejected even though they name a valid day.
pub fn parse_start_date(value: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = value.trim();
    let bytes = trimmed.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(ScheduleError::InvalidDate(value.to_string()));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ScheduleError::InvalidDate(value.to_string()))
}

/// Parse the number of interval units between two appointments.
pub fn parse_interval_count(value: &str) -> Result<u32, ScheduleError> {
    match value.trim().parse::<u32>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(ScheduleError::InvalidInterval(value.to_string())),
    }
}

/// Parse the plus/minus tolerance. Absent or blank means zero.
pub fn parse_tolerance_days(value: Option<&str>) -> Result<u32, ScheduleError> {
    match value.map(str::trim) {
        None | Some("") => Ok(0),
        Some(text) => text
            .parse::<u32>()
            .map_err(|_| ScheduleError::InvalidTolerance(text.to_string())),
    }
}

// =============================================================================
// Computation
// =============================================================================

/// Compute a schedule of [`DEFAULT_APPOINTMENT_COUNT`] appointments.
pub fn compute_schedule(
    start_date: NaiveDate,
    interval_unit: IntervalUnit,
    interval_count: u32,
    tolerance_days: u32,
) -> Result<ScheduleResult, ScheduleError> {
    compute_schedule_with(
        &ScheduleConfig::default(),
        start_date,
        interval_unit,
        interval_count,
        tolerance_days,
    )
}

/// Compute a schedule whose length comes from `config`.
pub fn compute_schedule_with(
    config: &ScheduleConfig,
    start_date: NaiveDate,
    interval_unit: IntervalUnit,
    interval_count: u32,
    tolerance_days: u32,
) -> Result<ScheduleResult, ScheduleError> {
    if config.appointment_count == 0 {
        return Err(ScheduleError::EmptySchedule);
    }
    if interval_count == 0 {
        return Err(ScheduleError::InvalidInterval(interval_count.to_string()));
    }

    let out_of_range = || ScheduleError::DateOutOfRange(start_date);
    let tolerance = Days::new(u64::from(tolerance_days));

    let mut entries = Vec::with_capacity(config.appointment_count as usize);
    let mut current = start_date;

    for k in 1..=config.appointment_count {
        if k > 1 {
            current = advance(current, interval_unit, interval_count).ok_or_else(out_of_range)?;
        }

        entries.push(AppointmentEntry {
            cycle_number: CycleNumber::new(k),
            on_date: current,
            plus_date: current.checked_add_days(tolerance).ok_or_else(out_of_range)?,
            minus_date: current.checked_sub_days(tolerance).ok_or_else(out_of_range)?,
        });
    }

    Ok(ScheduleResult::new(entries))
}

/// Move `date` forward by `steps` interval units. `None` on calendar overflow.
fn advance(date: NaiveDate, unit: IntervalUnit, steps: u32) -> Option<NaiveDate> {
    match unit {
        IntervalUnit::Day => date.checked_add_days(Days::new(u64::from(steps))),
        IntervalUnit::Week => date.checked_add_days(Days::new(u64::from(steps) * 7)),
        // chrono clamps the day of month to the last day of the target month
        IntervalUnit::Month => date.checked_add_months(Months::new(steps)),
    }
}

#[cfg(test)]
mod tests;
