//! A4 PDF reports: a title, the risk summary table and, for the full
//! report, the incident table split into page-sized chunks that each start
//! with the header row.

use std::path::PathBuf;

use genpdf::elements::{Break, FrameCellDecorator, PageBreak, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Style, StyledString};
use genpdf::{Alignment, Document, Element, PaperSize, SimplePageDecorator};
use thiserror::Error;

use crate::models::Incident;
use crate::reports::dashboard::RiskCounts;

pub const DASHBOARD_TITLE: &str = "Maintenance Dashboard Report";
pub const DASHBOARD_FILENAME: &str = "dashboard_report.pdf";
pub const FULL_TITLE: &str = "Maintenance Incident Report";
pub const FULL_FILENAME: &str = "incident_report.pdf";

pub const DASHBOARD_SUMMARY_HEADERS: [&str; 4] = ["Total", "High Risk", "Medium Risk", "Low Risk"];
pub const FULL_SUMMARY_HEADERS: [&str; 4] = ["Total Incidents", "High Risk", "Medium Risk", "Low Risk"];
pub const DETAIL_HEADERS: [&str; 7] = [
    "Date",
    "Last Maint.",
    "Pressure",
    "Temperature",
    "Failure",
    "Risk",
    "Actions",
];
const DETAIL_WEIGHTS: [usize; 7] = [7, 7, 6, 7, 8, 5, 10];
const DETAIL_FONT_SIZE: u8 = 7;

// Page geometry in millimetres.
const PAGE_MARGIN: f64 = 15.0;
const CONTENT_WIDTH: f64 = 210.0 - 2.0 * PAGE_MARGIN;
const CONTENT_HEIGHT: f64 = 297.0 - 2.0 * PAGE_MARGIN;
const CELL_PADDING: f64 = 1.0;
const ROW_SLACK: f64 = 1.0;
/// Title, summary table and the gaps around them on the first page.
const FIRST_PAGE_RESERVED: f64 = 45.0;
/// Fraction of the content height that detail chunks may fill.
const PAGE_FILL: f64 = 0.92;

// Font metrics as multiples of the font size, rounded up over the
// Liberation and DejaVu sans families.
const MM_PER_PT: f64 = 0.3528;
const LINE_HEIGHT_EM: f64 = 1.25;
const GLYPH_WIDTH_EM: f64 = 0.62;

/// File suffixes of the regular, bold, italic and bold italic faces.
const FACE_SUFFIXES: [[&str; 4]; 2] = [
    ["-Regular", "-Bold", "-Italic", "-BoldItalic"],
    ["", "-Bold", "-Oblique", "-BoldOblique"],
];

/// Families tried after the configured one.
const SYSTEM_FONTS: [(&str, &str); 6] = [
    ("/usr/share/fonts/truetype/liberation", "LiberationSans"),
    ("/usr/share/fonts/liberation", "LiberationSans"),
    ("/usr/share/fonts/truetype/dejavu", "DejaVuSans"),
    ("/usr/share/fonts/dejavu", "DejaVuSans"),
    ("/usr/share/fonts/TTF", "DejaVuSans"),
    ("/usr/share/fonts/truetype", "DejaVuSans"),
];

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("could not load font family '{name}' from {dir}: {message}")]
    Font { dir: String, name: String, message: String },

    #[error("could not lay out PDF: {0}")]
    Layout(String),

    #[error("could not render PDF: {0}")]
    Render(String),
}

/// Where a TrueType family is loaded from. The faces are either
/// `<name>-Regular.ttf`, `-Bold`, `-Italic`, `-BoldItalic` or
/// `<name>.ttf`, `-Bold`, `-Oblique`, `-BoldOblique`.
#[derive(Debug, Clone)]
pub struct FontSource {
    pub dir: PathBuf,
    pub name: String,
}

impl FontSource {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// The first available of `self` and the common system families, or
    /// `self` when none is installed so the error names the configured one.
    pub fn resolve(self) -> Self {
        if self.is_available() {
            return self;
        }
        SYSTEM_FONTS
            .iter()
            .map(|(dir, name)| FontSource::new(*dir, *name))
            .find(FontSource::is_available)
            .unwrap_or(self)
    }

    pub fn is_available(&self) -> bool {
        self.face_paths().is_some()
    }

    fn face_paths(&self) -> Option<[PathBuf; 4]> {
        FACE_SUFFIXES.iter().find_map(|suffixes| {
            let paths = suffixes.map(|s| self.dir.join(format!("{}{}.ttf", self.name, s)));
            paths.iter().all(|p| p.is_file()).then_some(paths)
        })
    }

    fn load(&self) -> Result<FontFamily<FontData>, PdfError> {
        let font_error = |message: String| PdfError::Font {
            dir: self.dir.display().to_string(),
            name: self.name.clone(),
            message,
        };
        let [regular, bold, italic, bold_italic] = self
            .face_paths()
            .ok_or_else(|| font_error("font files not found".to_string()))?;
        let face = |path: PathBuf| FontData::load(&path, None).map_err(|e| font_error(e.to_string()));
        Ok(FontFamily {
            regular: face(regular)?,
            bold: face(bold)?,
            italic: face(italic)?,
            bold_italic: face(bold_italic)?,
        })
    }
}

/// Lines `text` needs when greedily wrapped at spaces to `width` characters.
fn wrapped_lines(text: &str, width: usize) -> usize {
    let width = width.max(1);
    let mut lines = 1;
    let mut used = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };
        if needed <= width {
            used = needed;
        } else if used == 0 {
            lines += (len - 1) / width;
            used = (len - 1) % width + 1;
        } else {
            lines += 1 + (len.saturating_sub(1)) / width;
            used = (len.saturating_sub(1)) % width + 1;
        }
    }
    lines
}

/// Estimated height in mm of a table row drawn at `font_size`.
pub fn row_height<S: AsRef<str>>(cells: &[S], weights: &[usize], font_size: u8) -> f64 {
    let size_mm = f64::from(font_size) * MM_PER_PT;
    let total: usize = weights.iter().sum::<usize>().max(1);
    let lines = cells
        .iter()
        .zip(weights)
        .map(|(cell, weight)| {
            let inner = CONTENT_WIDTH * *weight as f64 / total as f64 - 2.0 * CELL_PADDING;
            let chars = (inner / (size_mm * GLYPH_WIDTH_EM)).floor().max(1.0) as usize;
            wrapped_lines(cell.as_ref(), chars)
        })
        .max()
        .unwrap_or(1);
    lines as f64 * size_mm * LINE_HEIGHT_EM + 2.0 * CELL_PADDING + ROW_SLACK
}

/// Splits `rows` into chunks whose summed `heights` stay within `first`
/// for the first chunk and `rest` for the others. A row taller than its
/// budget still gets a chunk of its own.
pub fn paginate_by_height<T: Clone>(rows: &[T], heights: &[f64], first: f64, rest: f64) -> Vec<Vec<T>> {
    let mut pages: Vec<Vec<T>> = Vec::new();
    let mut current = Vec::new();
    let mut used = 0.0;
    for (row, height) in rows.iter().zip(heights) {
        let budget = if pages.is_empty() { first } else { rest };
        if !current.is_empty() && used + height > budget {
            pages.push(std::mem::take(&mut current));
            used = 0.0;
        }
        current.push(row.clone());
        used += height;
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// Everything a report contains, independent of how it is drawn.
#[derive(Debug, Clone)]
pub struct PdfReport {
    pub title: String,
    pub filename: &'static str,
    pub summary_headers: [&'static str; 4],
    pub counts: RiskCounts,
    /// Incident rows grouped by page; empty for the summary-only report.
    pub detail_pages: Vec<Vec<[String; 7]>>,
}

impl PdfReport {
    pub fn dashboard(counts: RiskCounts) -> Self {
        Self {
            title: DASHBOARD_TITLE.to_string(),
            filename: DASHBOARD_FILENAME,
            summary_headers: DASHBOARD_SUMMARY_HEADERS,
            counts,
            detail_pages: Vec::new(),
        }
    }

    /// `incidents` are drawn in the order given.
    pub fn full(incidents: &[Incident]) -> Self {
        let rows: Vec<[String; 7]> = incidents.iter().map(Incident::field_strings).collect();
        let heights: Vec<f64> = rows
            .iter()
            .map(|r| row_height(r, &DETAIL_WEIGHTS, DETAIL_FONT_SIZE))
            .collect();
        let header = row_height(&DETAIL_HEADERS, &DETAIL_WEIGHTS, DETAIL_FONT_SIZE);
        let page = CONTENT_HEIGHT * PAGE_FILL - header;
        Self {
            title: FULL_TITLE.to_string(),
            filename: FULL_FILENAME,
            summary_headers: FULL_SUMMARY_HEADERS,
            counts: RiskCounts::from_incidents(incidents),
            detail_pages: paginate_by_height(&rows, &heights, page - FIRST_PAGE_RESERVED, page),
        }
    }

    pub fn detail_row_count(&self) -> usize {
        self.detail_pages.iter().map(Vec::len).sum()
    }

    pub fn summary_values(&self) -> [String; 4] {
        [
            self.counts.total.to_string(),
            self.counts.high.to_string(),
            self.counts.medium.to_string(),
            self.counts.low.to_string(),
        ]
    }

    pub fn render(&self, fonts: &FontSource) -> Result<Vec<u8>, PdfError> {
        let mut doc = Document::new(fonts.load()?);
        doc.set_title(self.title.clone());
        doc.set_paper_size(PaperSize::A4);
        doc.set_font_size(10);
        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);

        let title_style = Style::new().bold().with_font_size(18);
        doc.push(Paragraph::new(StyledString::new(self.title.clone(), title_style)).aligned(Alignment::Center));
        doc.push(Break::new(1));

        let mut summary = TableLayout::new(vec![1, 1, 1, 1]);
        summary.set_cell_decorator(FrameCellDecorator::new(true, true, false));
        push_row(&mut summary, &self.summary_headers, Style::new().bold())?;
        push_row(&mut summary, &self.summary_values(), Style::new())?;
        doc.push(summary);

        for (index, page) in self.detail_pages.iter().enumerate() {
            if index == 0 {
                doc.push(Break::new(1.5));
            } else {
                doc.push(PageBreak::new());
            }
            let mut table = TableLayout::new(DETAIL_WEIGHTS.to_vec());
            table.set_cell_decorator(FrameCellDecorator::new(true, true, false));
            push_row(&mut table, &DETAIL_HEADERS, Style::new().bold().with_font_size(DETAIL_FONT_SIZE))?;
            for row in page {
                push_row(&mut table, row, Style::new().with_font_size(DETAIL_FONT_SIZE))?;
            }
            doc.push(table);
        }

        let mut buf = Vec::new();
        doc.render(&mut buf).map_err(|e| PdfError::Render(e.to_string()))?;
        Ok(buf)
    }
}

fn push_row<S: AsRef<str>>(table: &mut TableLayout, cells: &[S], style: Style) -> Result<(), PdfError> {
    let mut row = table.row();
    for cell in cells {
        row.push_element(
            Paragraph::new(cell.as_ref().to_string())
                .aligned(Alignment::Center)
                .styled(style)
                .padded(1),
        );
    }
    row.push().map_err(|e| PdfError::Layout(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{get_pdf_font_dir, get_pdf_font_name};
    use chrono::Utc;

    fn incidents_with_actions(n: usize, actions: Option<&str>) -> Vec<Incident> {
        let now = Utc::now();
        (0..n)
            .map(|i| Incident {
                id: i as i64 + 1,
                date: "2024-01-01".parse().unwrap(),
                last_maintenance_date: None,
                pressure: 1.5,
                temperature: 60.0,
                failure: format!("Failure {}", i),
                risk: if i % 2 == 0 { "High".into() } else { "Low".into() },
                actions: actions.map(String::from),
                reported_by: None,
                reported_by_username: None,
                created_at: now,
                updated_at: now,
            })
            .collect()
    }

    fn incidents(n: usize) -> Vec<Incident> {
        incidents_with_actions(n, None)
    }

    const LONG_ACTIONS: &str = "replaced the gasket, flushed the line, recalibrated the pressure sensor \
                                and scheduled a follow up inspection next week";

    /// Honours PDF_FONT_DIR and PDF_FONT_NAME, then falls back to system families.
    fn test_fonts() -> FontSource {
        FontSource::new(get_pdf_font_dir(), get_pdf_font_name()).resolve()
    }

    fn page_count(pdf: &[u8]) -> usize {
        [&b"/Type/Page"[..], &b"/Type /Page"[..]]
            .iter()
            .map(|marker| {
                pdf.windows(marker.len() + 1)
                    .filter(|w| w.starts_with(marker) && w[marker.len()] != b's')
                    .count()
            })
            .sum()
    }

    #[test]
    fn wrapped_lines_breaks_at_spaces_and_splits_long_words() {
        assert_eq!(wrapped_lines("", 10), 1);
        assert_eq!(wrapped_lines("short", 10), 1);
        assert_eq!(wrapped_lines("aaaa bbbb cccc", 10), 2);
        assert_eq!(wrapped_lines("abcdefghijklmnopqrstuvwxy", 10), 3);
        assert_eq!(wrapped_lines("ab abcdefghijkl", 10), 3);
    }

    #[test]
    fn long_cells_make_taller_rows() {
        let short = incidents_with_actions(1, Some("Tightened"))[0].field_strings();
        let long = incidents_with_actions(1, Some(LONG_ACTIONS))[0].field_strings();
        let short_h = row_height(&short, &DETAIL_WEIGHTS, DETAIL_FONT_SIZE);
        let long_h = row_height(&long, &DETAIL_WEIGHTS, DETAIL_FONT_SIZE);
        assert_eq!(short_h, row_height(&DETAIL_HEADERS, &DETAIL_WEIGHTS, DETAIL_FONT_SIZE));
        assert!(long_h > 3.0 * (short_h - 2.0 * CELL_PADDING - ROW_SLACK));
    }

    #[test]
    fn paginate_by_height_respects_both_budgets() {
        let rows: Vec<usize> = (0..6).collect();
        let heights = [3.0, 3.0, 3.0, 5.0, 5.0, 5.0];
        let pages = paginate_by_height(&rows, &heights, 7.0, 10.0);
        assert_eq!(pages, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
    }

    #[test]
    fn paginate_by_height_keeps_oversized_rows_alone() {
        assert!(paginate_by_height::<u8>(&[], &[], 5.0, 5.0).is_empty());
        let pages = paginate_by_height(&[1, 2, 3], &[2.0, 50.0, 2.0], 10.0, 10.0);
        assert_eq!(pages, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn long_actions_produce_more_chunks() {
        let short = PdfReport::full(&incidents_with_actions(63, Some("Tightened")));
        let long = PdfReport::full(&incidents_with_actions(63, Some(LONG_ACTIONS)));
        assert!(long.detail_pages.len() > short.detail_pages.len());
        assert_eq!(long.detail_row_count(), 63);
        assert!(long.detail_pages[0].len() < long.detail_pages[1].len());
    }

    #[test]
    fn full_report_keeps_every_row_in_order() {
        let source = incidents(150);
        let report = PdfReport::full(&source);
        assert!(report.detail_pages.len() > 1);
        assert_eq!(report.detail_row_count(), source.len());
        let flattened: Vec<String> = report.detail_pages.iter().flatten().map(|r| r[4].clone()).collect();
        let expected: Vec<String> = source.iter().map(|i| i.failure.clone()).collect();
        assert_eq!(flattened, expected);
        assert_eq!(report.counts.total, source.len());
        assert_eq!(report.summary_values()[0], source.len().to_string());
        assert_eq!(report.summary_headers[0], "Total Incidents");
    }

    #[test]
    fn detail_rows_follow_header_order() {
        let report = PdfReport::full(&incidents(1));
        let row = &report.detail_pages[0][0];
        assert_eq!(DETAIL_HEADERS[0], "Date");
        assert_eq!(row[0], "2024-01-01");
        assert_eq!(row[2], "1.5");
        assert_eq!(row[3], "60");
        assert_eq!(row[5], "High");
    }

    #[test]
    fn dashboard_report_has_no_detail() {
        let report = PdfReport::dashboard(RiskCounts { total: 3, high: 1, medium: 1, low: 1 });
        assert_eq!(report.filename, DASHBOARD_FILENAME);
        assert!(report.detail_pages.is_empty());
        assert_eq!(report.summary_headers, ["Total", "High Risk", "Medium Risk", "Low Risk"]);
        assert_eq!(report.summary_values(), ["3", "1", "1", "1"].map(String::from));
    }

    #[test]
    fn missing_fonts_are_reported() {
        let fonts = FontSource::new("/nonexistent/fonts", "NoSuchFont");
        assert!(!fonts.is_available());
        let err = PdfReport::dashboard(RiskCounts::default()).render(&fonts).unwrap_err();
        assert!(matches!(err, PdfError::Font { .. }));
    }

    #[test]
    fn resolve_keeps_an_available_source() {
        let dir = tempfile::tempdir().unwrap();
        for suffix in ["", "-Bold", "-Oblique", "-BoldOblique"] {
            std::fs::write(dir.path().join(format!("Plant{}.ttf", suffix)), b"").unwrap();
        }
        let fonts = FontSource::new(dir.path(), "Plant");
        assert!(fonts.is_available());
        assert_eq!(fonts.resolve().name, "Plant");
    }

    // Skipped when neither the configured family nor a system fallback is installed.
    #[test]
    fn every_rendered_page_starts_a_chunk() {
        let fonts = test_fonts();
        if !fonts.is_available() {
            return;
        }
        for actions in ["Tightened", LONG_ACTIONS] {
            let report = PdfReport::full(&incidents_with_actions(63, Some(actions)));
            let bytes = report.render(&fonts).unwrap();
            assert!(bytes.starts_with(b"%PDF"));
            assert_eq!(page_count(&bytes), report.detail_pages.len(), "actions: {}", actions);
        }
        let dashboard = PdfReport::dashboard(RiskCounts::default()).render(&fonts).unwrap();
        assert_eq!(page_count(&dashboard), 1);
    }
}
