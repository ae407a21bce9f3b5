//! Error types for schedule computation and input parsing.

use chrono::NaiveDate;

/// Error type for turning a submission into a schedule.
///
/// Every variant is user-correctable: the message is shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Start date is not a real calendar date in `YYYY-MM-DD` form.
    #[error("Invalid start date '{0}': expected a calendar date formatted YYYY-MM-DD")]
    InvalidDate(String),

    /// Interval count is not a whole number of at least 1.
    #[error("Invalid interval '{0}': expected a whole number of at least 1")]
    InvalidInterval(String),

    #[error("Invalid plus/minus days '{0}': expected a whole number of at least 0")]
    InvalidTolerance(String),

    #[error("Unknown interval type '{0}': must be one of day, week, month")]
    UnknownIntervalUnit(String),

    #[error("Unknown appointment type '{0}': must be one of imaging, cycle_visit")]
    UnknownAppointmentType(String),

    /// An appointment or its tolerance window falls outside the supported calendar.
    #[error("Schedule starting {0} leaves the supported calendar range")]
    DateOutOfRange(NaiveDate),

    #[error("Appointment count must be at least 1")]
    EmptySchedule,
}
