//! Server-rendered HTML for the appointment form.
//!
//! The page is a single Bootstrap container: the form, then (after a
//! submission) either the validation messages or the appointment table with
//! a success banner and download links.

use std::fmt::Write as _;

use super::dto::CalculateForm;
use crate::models::{AppointmentType, IntervalUnit};
use crate::services::{RenderedReport, REPORT_HEADER};

pub const PAGE_TITLE: &str = "Patient Appointment Date";

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css";

/// A downloadable report link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub label: &'static str,
    pub filename: String,
    pub href: String,
}

impl From<&RenderedReport> for Download {
    fn from(report: &RenderedReport) -> Self {
        Self {
            label: report.format.label(),
            filename: report.filename.clone(),
            href: report.to_data_uri(),
        }
    }
}

/// What to show below the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Nothing submitted yet
    Empty,
    /// Submission rejected; one message per problem
    Rejected(Vec<String>),
    /// Schedule computed
    Computed {
        rows: Vec<[String; 4]>,
        downloads: Vec<Download>,
    },
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole page.
pub fn render_page(form: &CalculateForm, outcome: &PageOutcome) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<link rel=\"stylesheet\" href=\"{css}\">\n</head>\n\
         <body>\n<div class=\"container p-5\">\n\
         <h1 class=\"text-center mt-4 mb-4\">{title}</h1>\n",
        title = PAGE_TITLE,
        css = BOOTSTRAP_CSS,
    );

    render_form(&mut html, form);

    match outcome {
        PageOutcome::Empty => {}
        PageOutcome::Rejected(messages) => render_errors(&mut html, messages),
        PageOutcome::Computed { rows, downloads } => {
            render_table(&mut html, rows);
            render_alert(&mut html, downloads);
        }
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, form: &CalculateForm) {
    let value = |field: &Option<String>| escape_html(field.as_deref().unwrap_or_default());

    html.push_str("<form method=\"post\" action=\"/calculate\">\n");

    let _ = write!(
        html,
        "<div class=\"form-group mb-3\"><label for=\"name-input\" class=\"mr-2\">Enter your name:</label>\
         <input id=\"name-input\" name=\"name\" type=\"text\" class=\"form-control\" value=\"{}\"></div>\n",
        value(&form.name)
    );

    let selected_type = form
        .appointment_type
        .as_deref()
        .and_then(|v| v.parse::<AppointmentType>().ok())
        .unwrap_or_default();
    html.push_str(
        "<div class=\"form-group mb-3\"><label for=\"appointment-type-dropdown\" class=\"mr-2\">Select Appointment Type:</label>\
         <select id=\"appointment-type-dropdown\" name=\"appointment_type\" class=\"form-control w-50\">",
    );
    for kind in AppointmentType::ALL {
        render_option(html, kind.as_str(), kind.label(), kind == selected_type);
    }
    html.push_str("</select></div>\n");

    let _ = write!(
        html,
        "<div class=\"form-group mb-3\"><label for=\"start-date-input\" class=\"mr-2\">Date of C1D1 or Randomization (YYYY-MM-DD):</label>\
         <input id=\"start-date-input\" name=\"start_date\" type=\"text\" class=\"form-control\" value=\"{}\"></div>\n",
        value(&form.start_date)
    );

    let selected_unit = form
        .interval_type
        .as_deref()
        .and_then(|v| v.parse::<IntervalUnit>().ok())
        .unwrap_or_default();
    html.push_str(
        "<div class=\"form-group mb-3\"><label for=\"interval-dropdown\" class=\"mr-2\">Select Scheduling Interval:</label>\
         <select id=\"interval-dropdown\" name=\"interval_type\" class=\"form-control w-25\">",
    );
    for unit in IntervalUnit::ALL {
        render_option(html, unit.as_str(), unit.label(), unit == selected_unit);
    }
    html.push_str("</select></div>\n");

    let _ = write!(
        html,
        "<div class=\"form-group mb-3\"><label for=\"interval-input\" class=\"mr-2\">Enter the number of intervals between appointments:</label>\
         <input id=\"interval-input\" name=\"interval_value\" type=\"number\" class=\"form-control\" value=\"{}\"></div>\n",
        value(&form.interval_value)
    );
    let _ = write!(
        html,
        "<div class=\"form-group mb-3\"><label for=\"plus-minus-days-input\" class=\"mr-2\">Enter the number of plus/minus days:</label>\
         <input id=\"plus-minus-days-input\" name=\"plus_minus_days\" type=\"number\" class=\"form-control\" value=\"{}\"></div>\n",
        value(&form.plus_minus_days)
    );

    html.push_str(
        "<button id=\"calculate-button\" type=\"submit\" class=\"btn btn-primary mb-3\">Calculate Appointments</button>\n</form>\n",
    );
}

fn render_option(html: &mut String, value: &str, label: &str, selected: bool) {
    let _ = write!(
        html,
        "<option value=\"{}\"{}>{}</option>",
        value,
        if selected { " selected" } else { "" },
        label
    );
}

fn render_errors(html: &mut String, messages: &[String]) {
    html.push_str("<div id=\"errors\" class=\"alert alert-danger\" role=\"alert\"><ul class=\"mb-0\">");
    for message in messages {
        let _ = write!(html, "<li>{}</li>", escape_html(message));
    }
    html.push_str("</ul></div>\n");
}

fn render_table(html: &mut String, rows: &[[String; 4]]) {
    html.push_str("<div id=\"appointment-table-div\"><table id=\"appointment-table\" class=\"table table-striped\">\n<thead><tr>");
    for title in REPORT_HEADER {
        let _ = write!(html, "<th>{}</th>", title);
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape_html(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table></div>\n");
}

fn render_alert(html: &mut String, downloads: &[Download]) {
    html.push_str("<div id=\"alert\" class=\"alert alert-success\" role=\"alert\">Appointment dates calculated.");
    for download in downloads {
        let _ = write!(
            html,
            " <a class=\"alert-link\" href=\"{}\" download=\"{}\">Download {}</a>",
            download.href,
            escape_html(&download.filename),
            download.label
        );
    }
    html.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"O'Neil\" & co</b>"),
            "&lt;b&gt;&quot;O&#39;Neil&quot; &amp; co&lt;/b&gt;"
        );
    }

    #[test]
    fn test_empty_page_has_form_only() {
        let html = render_page(&CalculateForm::default(), &PageOutcome::Empty);
        assert!(html.contains("<title>Patient Appointment Date</title>"));
        assert!(html.contains("id=\"calculate-button\""));
        assert!(!html.contains("id=\"appointment-table\""));
        assert!(!html.contains("id=\"alert\""));
        assert!(!html.contains("id=\"errors\""));
    }

    #[test]
    fn test_form_values_are_echoed_and_escaped() {
        let form = CalculateForm {
            name: Some("<script>".to_string()),
            interval_type: Some("month".to_string()),
            ..Default::default()
        };
        let html = render_page(&form, &PageOutcome::Empty);
        assert!(html.contains("value=\"&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<option value=\"month\" selected>Month</option>"));
        assert!(html.contains("<option value=\"imaging\" selected>Imaging</option>"));
    }

    #[test]
    fn test_rejected_page_lists_messages() {
        let outcome = PageOutcome::Rejected(vec!["Start date is required".to_string()]);
        let html = render_page(&CalculateForm::default(), &outcome);
        assert!(html.contains("<li>Start date is required</li>"));
        assert!(!html.contains("id=\"appointment-table\""));
        assert!(!html.contains("id=\"alert\""));
    }

    #[test]
    fn test_computed_page_has_table_and_links() {
        let outcome = PageOutcome::Computed {
            rows: vec![["1", "2024-01-01", "2024-01-03", "2023-12-30"].map(String::from)],
            downloads: vec![Download {
                label: "PDF",
                filename: "appointment_report.pdf".to_string(),
                href: "data:application/pdf;base64,JVBERg==".to_string(),
            }],
        };
        let html = render_page(&CalculateForm::default(), &outcome);
        assert!(html.contains("<th>Cycle Number</th><th>Date</th><th>Plus Day Date</th><th>Minus Day Date</th>"));
        assert!(html.contains("<td>1</td><td>2024-01-01</td><td>2024-01-03</td><td>2023-12-30</td>"));
        assert!(html.contains("href=\"data:application/pdf;base64,JVBERg==\" download=\"appointment_report.pdf\""));
    }
}
