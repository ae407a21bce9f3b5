//! XLSX encoder for appointment reports.

use rust_xlsxwriter::Workbook;

use crate::models::ScheduleResult;

use super::report::{ReportError, REPORT_HEADER};

/// Name of the only worksheet in the workbook.
pub const SHEET_NAME: &str = "Appointment Report";

/// Encode the schedule as an in-memory workbook.
///
/// Cycle numbers are written as numbers, dates as `YYYY-MM-DD` text so that
/// spreadsheet locales cannot reformat them.
pub(crate) fn render(schedule: &ScheduleResult) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in REPORT_HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
        sheet.set_column_width(col as u16, 16)?;
    }

    for (i, entry) in schedule.iter().enumerate() {
        let row = (i + 1) as u32;
        let [on, plus, minus] = entry.date_strings();

        sheet.write_number(row, 0, f64::from(entry.cycle_number.value()))?;
        sheet.write_string(row, 1, on)?;
        sheet.write_string(row, 2, plus)?;
        sheet.write_string(row, 3, minus)?;
    }

    Ok(workbook.save_to_buffer()?)
}
