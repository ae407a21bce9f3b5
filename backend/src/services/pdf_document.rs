//! PDF encoder for appointment reports.
//!
//! Lays out a US Letter document: centred title, two metadata lines, then the
//! appointment table with a shaded header row and full grid. Rows that do not
//! fit on the current page continue on a new page under a repeated header.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use std::io::BufWriter;

use crate::models::{ReportMetadata, ScheduleResult};

use super::report::{report_table, ReportError, REPORT_HEADER, REPORT_TITLE};

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN_TOP: f32 = 25.0;
const MARGIN_BOTTOM: f32 = 20.0;
const MARGIN_LEFT: f32 = 25.0;

const COLUMN_WIDTH: f32 = 40.0;
const HEADER_ROW_HEIGHT: f32 = 9.0;
const ROW_HEIGHT: f32 = 6.5;

const TITLE_SIZE: f32 = 18.0;
const HEADER_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;

const GRID_WIDTH: f32 = 0.5;
const BOX_WIDTH: f32 = 1.0;

const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_HEADER: (u8, u8, u8) = (0xCC, 0xCC, 0xCC);

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.52;
const PT_TO_MM: f32 = 0.352_778;

/// Builtin fonts are WinAnsi encoded; anything past Latin-1 prints as this.
const UNPRINTABLE: char = '?';
const ELLIPSIS: &str = "...";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Encode the report as PDF bytes.
pub(crate) fn render(
    metadata: &ReportMetadata,
    schedule: &ScheduleResult,
) -> Result<Vec<u8>, ReportError> {
    let (doc, page1, layer1) =
        PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Document(format!("font error: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Document(format!("font error: {e}")))?,
    };

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut y = PAGE_HEIGHT - MARGIN_TOP;

    // Title
    let title_x = (PAGE_WIDTH - text_width(REPORT_TITLE, TITLE_SIZE)) / 2.0;
    add_text(&layer, &fonts.bold, REPORT_TITLE, title_x, y, TITLE_SIZE);
    y -= 14.0;

    // Metadata paragraphs
    let name_line = fit_line(&format!("Patient Name: {}", metadata.patient_name), BODY_SIZE);
    add_text(&layer, &fonts.regular, &name_line, MARGIN_LEFT, y, BODY_SIZE);
    y -= 6.0;
    let type_line = fit_line(&format!("Appointment Type: {}", metadata.appointment_type), BODY_SIZE);
    add_text(&layer, &fonts.regular, &type_line, MARGIN_LEFT, y, BODY_SIZE);
    y -= 10.0;

    let rows = report_table(schedule);
    let mut remaining = rows.as_slice();

    loop {
        let capacity = (((y - MARGIN_BOTTOM - HEADER_ROW_HEIGHT) / ROW_HEIGHT).floor() as usize).max(1);
        let (chunk, rest) = remaining.split_at(capacity.min(remaining.len()));
        draw_table(&layer, &fonts, y, chunk);
        remaining = rest;

        if remaining.is_empty() {
            break;
        }

        let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        layer = doc.get_page(page).get_layer(page_layer);
        y = PAGE_HEIGHT - MARGIN_TOP;
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Document(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Document(format!("buffer error: {e}")))
}

/// Draw the header plus `rows` with the table's top edge at `top` (mm).
fn draw_table(layer: &PdfLayerReference, fonts: &Fonts, top: f32, rows: &[[String; 4]]) {
    let columns = REPORT_HEADER.len();
    let left = MARGIN_LEFT;
    let right = left + COLUMN_WIDTH * columns as f32;
    let header_bottom = top - HEADER_ROW_HEIGHT;
    let bottom = header_bottom - ROW_HEIGHT * rows.len() as f32;

    // Header shading
    layer.set_fill_color(rgb(COLOR_HEADER));
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(Mm(left), Mm(header_bottom)), false),
            (Point::new(Mm(right), Mm(header_bottom)), false),
            (Point::new(Mm(right), Mm(top)), false),
            (Point::new(Mm(left), Mm(top)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });

    // Header text, bottom-padded like the body rows but in the taller band
    layer.set_fill_color(rgb(COLOR_BLACK));
    for (col, title) in REPORT_HEADER.iter().enumerate() {
        let x = centred_x(left + COLUMN_WIDTH * col as f32, title, HEADER_SIZE);
        layer.use_text(*title, HEADER_SIZE, Mm(x), Mm(header_bottom + 3.0), &fonts.bold);
    }

    for (i, row) in rows.iter().enumerate() {
        let baseline = header_bottom - ROW_HEIGHT * (i as f32 + 1.0) + 2.0;
        for (col, cell) in row.iter().enumerate() {
            let x = centred_x(left + COLUMN_WIDTH * col as f32, cell, BODY_SIZE);
            layer.use_text(cell.as_str(), BODY_SIZE, Mm(x), Mm(baseline), &fonts.regular);
        }
    }

    // Inner grid
    layer.set_outline_color(rgb(COLOR_BLACK));
    layer.set_outline_thickness(GRID_WIDTH);
    add_line(layer, left, header_bottom, right, header_bottom);
    for i in 1..rows.len() {
        let y = header_bottom - ROW_HEIGHT * i as f32;
        add_line(layer, left, y, right, y);
    }
    for col in 1..columns {
        let x = left + COLUMN_WIDTH * col as f32;
        add_line(layer, x, top, x, bottom);
    }

    // Outer box
    layer.set_outline_thickness(BOX_WIDTH);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(left), Mm(bottom)), false),
            (Point::new(Mm(right), Mm(bottom)), false),
            (Point::new(Mm(right), Mm(top)), false),
            (Point::new(Mm(left), Mm(top)), false),
        ],
        is_closed: true,
    });
}

fn rgb(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

fn add_text(layer: &PdfLayerReference, font: &IndirectFontRef, text: &str, x: f32, y: f32, size: f32) {
    layer.set_fill_color(rgb(COLOR_BLACK));
    layer.use_text(text, size, Mm(x), Mm(y), font);
}

fn add_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
        ],
        is_closed: false,
    });
}

/// Approximate rendered width in mm; builtin fonts carry no metrics here.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_WIDTH_RATIO * PT_TO_MM
}

/// Make `text` printable in a builtin font and cut it to the text column.
///
/// Characters outside Latin-1 are replaced with [`UNPRINTABLE`]; text wider
/// than the page margins is truncated with an ellipsis.
fn fit_line(text: &str, size: f32) -> String {
    let max_width = PAGE_WIDTH - 2.0 * MARGIN_LEFT;
    let printable: String = text
        .chars()
        .map(|c| if u32::from(c) <= 0xFF && !c.is_control() { c } else { UNPRINTABLE })
        .collect();

    if text_width(&printable, size) <= max_width {
        return printable;
    }

    let budget = max_width - text_width(ELLIPSIS, size);
    let mut line = String::new();
    for c in printable.chars() {
        line.push(c);
        if text_width(&line, size) > budget {
            line.pop();
            break;
        }
    }
    line.push_str(ELLIPSIS);
    line
}

fn centred_x(cell_left: f32, text: &str, size: f32) -> f32 {
    cell_left + ((COLUMN_WIDTH - text_width(text, size)) / 2.0).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_grows_with_length() {
        assert!(text_width("Minus Day Date", HEADER_SIZE) > text_width("Date", HEADER_SIZE));
        assert_eq!(text_width("", BODY_SIZE), 0.0);
    }

    #[test]
    fn test_header_fits_column() {
        for title in REPORT_HEADER {
            assert!(text_width(title, HEADER_SIZE) < COLUMN_WIDTH, "{title} overflows its column");
        }
    }

    #[test]
    fn test_fit_line_keeps_short_text() {
        assert_eq!(fit_line("Patient Name: Zoë Müller", BODY_SIZE), "Patient Name: Zoë Müller");
    }

    #[test]
    fn test_fit_line_replaces_non_latin1() {
        assert_eq!(fit_line("Patient Name: 王芳", BODY_SIZE), "Patient Name: ??");
        assert_eq!(fit_line("a\tb", BODY_SIZE), "a?b");
    }

    #[test]
    fn test_fit_line_truncates_to_page_width() {
        let long = format!("Patient Name: {}", "W".repeat(300));
        let line = fit_line(&long, BODY_SIZE);

        assert!(line.starts_with("Patient Name: WWW"));
        assert!(line.ends_with(ELLIPSIS));
        assert!(text_width(&line, BODY_SIZE) <= PAGE_WIDTH - 2.0 * MARGIN_LEFT);
    }

    #[test]
    fn test_default_schedule_fits_first_page() {
        // Title block consumes 14 + 6 + 10 mm below the top margin
        let table_top = PAGE_HEIGHT - MARGIN_TOP - 30.0;
        let capacity = ((table_top - MARGIN_BOTTOM - HEADER_ROW_HEIGHT) / ROW_HEIGHT).floor() as usize;
        assert!(capacity >= 30);
    }
}
