//! Domain types for appointment schedules.
//!
//! A [`ScheduleRequest`] describes one form submission; the scheduler turns it
//! into a [`ScheduleResult`], an ordered list of [`AppointmentEntry`] values
//! that the report renderer serializes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::define_number_type;
use crate::scheduler::{self, ScheduleConfig, ScheduleError};

/// `strftime` pattern used for every date shown to the user or written to a report.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

define_number_type!(u32, CycleNumber);

// =============================================================================
// Enumerations
// =============================================================================

/// Kind of visit being planned. Only used as report metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    #[default]
    Imaging,
    CycleVisit,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 2] = [AppointmentType::Imaging, AppointmentType::CycleVisit];

    /// Wire value, as submitted by the form and printed in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Imaging => "imaging",
            AppointmentType::CycleVisit => "cycle_visit",
        }
    }

    /// Human-readable label for the form dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentType::Imaging => "Imaging",
            AppointmentType::CycleVisit => "Cycle Visit",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentType {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "imaging" => Ok(AppointmentType::Imaging),
            "cycle_visit" => Ok(AppointmentType::CycleVisit),
            _ => Err(ScheduleError::UnknownAppointmentType(value.to_string())),
        }
    }
}

/// Calendar granularity used to space successive appointments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    #[default]
    Day,
    Week,
    Month,
}

impl IntervalUnit {
    pub const ALL: [IntervalUnit; 3] = [IntervalUnit::Day, IntervalUnit::Week, IntervalUnit::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalUnit::Day => "day",
            IntervalUnit::Week => "week",
            IntervalUnit::Month => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntervalUnit::Day => "Day",
            IntervalUnit::Week => "Week",
            IntervalUnit::Month => "Month",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalUnit {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "day" => Ok(IntervalUnit::Day),
            "week" => Ok(IntervalUnit::Week),
            "month" => Ok(IntervalUnit::Month),
            _ => Err(ScheduleError::UnknownIntervalUnit(value.to_string())),
        }
    }
}

// =============================================================================
// Request
// =============================================================================

/// A validated schedule request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub patient_name: String,
    pub appointment_type: AppointmentType,
    pub start_date: NaiveDate,
    pub interval_unit: IntervalUnit,
    /// Number of `interval_unit`s between two appointments (at least 1)
    pub interval_count: u32,
    /// Symmetric slack around each appointment, in days
    #[serde(default)]
    pub tolerance_days: u32,
}

impl ScheduleRequest {
    /// Build a request from the raw text of a submission.
    ///
    /// Presence of the required fields is the caller's concern; this only
    /// checks that every value parses.
    pub fn parse(
        patient_name: &str,
        appointment_type: &str,
        start_date: &str,
        interval_unit: &str,
        interval_count: &str,
        tolerance_days: Option<&str>,
    ) -> Result<Self, ScheduleError> {
        Ok(Self {
            patient_name: patient_name.trim().to_string(),
            appointment_type: appointment_type.parse()?,
            start_date: scheduler::parse_start_date(start_date)?,
            interval_unit: interval_unit.parse()?,
            interval_count: scheduler::parse_interval_count(interval_count)?,
            tolerance_days: scheduler::parse_tolerance_days(tolerance_days)?,
        })
    }

    /// Run the scheduler for this request.
    pub fn compute(&self, config: &ScheduleConfig) -> Result<ScheduleResult, ScheduleError> {
        scheduler::compute_schedule_with(
            config,
            self.start_date,
            self.interval_unit,
            self.interval_count,
            self.tolerance_days,
        )
    }

    pub fn metadata(&self) -> ReportMetadata {
        ReportMetadata {
            patient_name: self.patient_name.clone(),
            appointment_type: self.appointment_type,
        }
    }
}

// =============================================================================
// Result
// =============================================================================

/// One scheduled visit and its tolerance window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentEntry {
    pub cycle_number: CycleNumber,
    pub on_date: NaiveDate,
    pub plus_date: NaiveDate,
    pub minus_date: NaiveDate,
}

impl AppointmentEntry {
    /// The on/plus/minus dates rendered with [`DATE_FORMAT`].
    pub fn date_strings(&self) -> [String; 3] {
        [
            self.on_date.format(DATE_FORMAT).to_string(),
            self.plus_date.format(DATE_FORMAT).to_string(),
            self.minus_date.format(DATE_FORMAT).to_string(),
        ]
    }
}

/// Ordered appointments, cycle 1 first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleResult {
    entries: Vec<AppointmentEntry>,
}

impl ScheduleResult {
    pub(crate) fn new(entries: Vec<AppointmentEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AppointmentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AppointmentEntry> {
        self.entries.iter()
    }

    /// Entry for a 1-based cycle number.
    pub fn cycle(&self, cycle: CycleNumber) -> Option<&AppointmentEntry> {
        let index = cycle.value().checked_sub(1)?;
        self.entries.get(index as usize)
    }
}

impl<'a> IntoIterator for &'a ScheduleResult {
    type Item = &'a AppointmentEntry;
    type IntoIter = std::slice::Iter<'a, AppointmentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Patient details printed above the report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub patient_name: String,
    pub appointment_type: AppointmentType,
}
