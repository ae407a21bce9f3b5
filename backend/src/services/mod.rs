//! Service layer for report generation.
//!
//! This module turns computed schedules into downloadable files. The HTTP
//! layer calls into it after the scheduler has produced a result; nothing
//! here depends on the web framework.

mod pdf_document;
pub mod report;
pub mod spreadsheet;


pub use report::{
    render_report, report_table, RenderedReport, ReportError, ReportFormat, REPORT_HEADER,
    REPORT_TITLE,
};
pub use spreadsheet::SHEET_NAME;
