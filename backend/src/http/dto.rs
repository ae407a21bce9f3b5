//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies keep every field as text so that validation can report
//! each problem in the user's own words instead of failing deserialization.

use serde::{Deserialize, Serialize};

use crate::models::{AppointmentEntry, AppointmentType, ScheduleRequest, ScheduleResult};
use crate::scheduler::ScheduleError;

/// Fields submitted by the appointment form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculateForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub appointment_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub interval_type: Option<String>,
    #[serde(default)]
    pub interval_value: Option<String>,
    #[serde(default)]
    pub plus_minus_days: Option<String>,
}

/// Trimmed, non-empty field value.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl CalculateForm {
    /// One message per required field left empty, in form order.
    pub fn missing_fields(&self) -> Vec<String> {
        [
            (&self.name, "Patient name"),
            (&self.start_date, "Start date"),
            (&self.interval_type, "Interval type"),
            (&self.interval_value, "Interval value"),
        ]
        .into_iter()
        .filter(|(field, _)| present(field).is_none())
        .map(|(_, label)| format!("{} is required", label))
        .collect()
    }

    /// Parse the submission. Call [`Self::missing_fields`] first.
    pub fn to_request(&self) -> Result<ScheduleRequest, ScheduleError> {
        ScheduleRequest::parse(
            present(&self.name).unwrap_or_default(),
            present(&self.appointment_type).unwrap_or(AppointmentType::default().as_str()),
            present(&self.start_date).unwrap_or_default(),
            present(&self.interval_type).unwrap_or_default(),
            present(&self.interval_value).unwrap_or_default(),
            present(&self.plus_minus_days),
        )
    }
}

/// A JSON value that may arrive either as a number or as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Number(serde_json::Number),
    Text(String),
}

impl TextOrNumber {
    pub fn to_text(&self) -> String {
        match self {
            TextOrNumber::Number(n) => n.to_string(),
            TextOrNumber::Text(s) => s.clone(),
        }
    }
}

/// Request body for the JSON schedule and report endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequestDto {
    pub patient_name: String,
    /// `imaging` (default) or `cycle_visit`
    #[serde(default)]
    pub appointment_type: Option<String>,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `day`, `week` or `month`
    pub interval_unit: String,
    pub interval_count: TextOrNumber,
    /// Plus/minus days (default: 0)
    #[serde(default)]
    pub tolerance_days: Option<TextOrNumber>,
}

impl ScheduleRequestDto {
    pub fn patient_name_missing(&self) -> bool {
        self.patient_name.trim().is_empty()
    }

    pub fn to_request(&self) -> Result<ScheduleRequest, ScheduleError> {
        let tolerance = self.tolerance_days.as_ref().map(TextOrNumber::to_text);
        ScheduleRequest::parse(
            &self.patient_name,
            self.appointment_type
                .as_deref()
                .unwrap_or(AppointmentType::default().as_str()),
            &self.start_date,
            &self.interval_unit,
            &self.interval_count.to_text(),
            tolerance.as_deref(),
        )
    }
}

/// One appointment in API responses, dates as `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentEntryDto {
    pub cycle_number: u32,
    pub date: String,
    pub plus_date: String,
    pub minus_date: String,
}

impl From<&AppointmentEntry> for AppointmentEntryDto {
    fn from(entry: &AppointmentEntry) -> Self {
        let [date, plus_date, minus_date] = entry.date_strings();
        Self {
            cycle_number: entry.cycle_number.value(),
            date,
            plus_date,
            minus_date,
        }
    }
}

/// Response for the schedule endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub patient_name: String,
    pub appointment_type: AppointmentType,
    /// Number of appointments
    pub total: usize,
    pub entries: Vec<AppointmentEntryDto>,
}

impl ScheduleResponse {
    pub fn new(request: &ScheduleRequest, schedule: &ScheduleResult) -> Self {
        Self {
            patient_name: request.patient_name.clone(),
            appointment_type: request.appointment_type,
            total: schedule.len(),
            entries: schedule.iter().map(Into::into).collect(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
}
