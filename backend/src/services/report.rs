//! Report rendering.
//!
//! Serializes a [`ScheduleResult`] plus patient metadata into a downloadable
//! file. Both encoders share the same table layout: a header row followed by
//! one row per appointment.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::models::{ReportMetadata, ScheduleResult};

use super::{pdf_document, spreadsheet};

/// Column titles shared by the HTML table, the PDF and the workbook.
pub const REPORT_HEADER: [&str; 4] = ["Cycle Number", "Date", "Plus Day Date", "Minus Day Date"];

/// Title printed at the top of the PDF report.
pub const REPORT_TITLE: &str = "Patient Appointment Dates";

/// Error raised while building a report file.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF generation failed: {0}")]
    Document(String),

    #[error("Spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Unknown report format '{0}': must be pdf or xlsx")]
    UnknownFormat(String),
}

/// Output encoding of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Paginated PDF document
    #[serde(rename = "pdf")]
    Document,
    /// Single-sheet XLSX workbook
    #[serde(rename = "xlsx")]
    Spreadsheet,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Document, ReportFormat::Spreadsheet];

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Document => "pdf",
            ReportFormat::Spreadsheet => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Document => "application/pdf",
            ReportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Suggested download name, e.g. `appointment_report.pdf`.
    pub fn filename(&self) -> String {
        format!("appointment_report.{}", self.extension())
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportFormat::Document => "PDF",
            ReportFormat::Spreadsheet => "Excel",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pdf" | "document" => Ok(ReportFormat::Document),
            "xlsx" | "excel" | "spreadsheet" => Ok(ReportFormat::Spreadsheet),
            _ => Err(ReportError::UnknownFormat(value.to_string())),
        }
    }
}

/// An encoded report ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub format: ReportFormat,
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl RenderedReport {
    /// Same-document `data:` URI carrying the file, for browser downloads.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Data rows of the report table (header excluded), dates as `YYYY-MM-DD`.
pub fn report_table(schedule: &ScheduleResult) -> Vec<[String; 4]> {
    schedule
        .iter()
        .map(|entry| {
            let [on, plus, minus] = entry.date_strings();
            [entry.cycle_number.to_string(), on, plus, minus]
        })
        .collect()
}

/// Render `schedule` in the requested format.
pub fn render_report(
    format: ReportFormat,
    metadata: &ReportMetadata,
    schedule: &ScheduleResult,
) -> Result<RenderedReport, ReportError> {
    let bytes = match format {
        ReportFormat::Document => pdf_document::render(metadata, schedule)?,
        ReportFormat::Spreadsheet => spreadsheet::render(schedule)?,
    };

    debug!(
        format = %format,
        rows = schedule.len(),
        size = bytes.len(),
        "Rendered appointment report"
    );

    Ok(RenderedReport {
        format,
        filename: format.filename(),
        mime_type: format.mime_type(),
        bytes,
    })
}
