//! Report page layout.
//!
//! The layout is computed here as positioned text lines, independent of the
//! document format. An encoder (see `ports::DocumentEncoder`) turns it into
//! bytes. Coordinates are PDF points with the origin at the bottom-left.

use crate::domain::patient::PatientRecord;
use crate::domain::prediction::PredictionResult;

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.2756;
/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 841.8898;
/// Nothing may extend past `PAGE_WIDTH - RIGHT_MARGIN`.
pub const RIGHT_MARGIN: f32 = 50.0;

pub const TITLE: &str = "Health Prediction Report";
const TITLE_X: f32 = 200.0;
const TITLE_Y: f32 = 800.0;
const TITLE_SIZE: f32 = 16.0;

const BODY_X: f32 = 50.0;
const BODY_SIZE: f32 = 12.0;
const SUMMARY_Y: [f32; 4] = [770.0, 750.0, 730.0, 710.0];
const DETAILS_HEADER_Y: f32 = 680.0;

const DETAIL_X: f32 = 60.0;
const DETAIL_START_Y: f32 = 660.0;
const LINE_HEIGHT: f32 = 24.0;
/// Once the cursor falls below this, the next line goes on a new page.
const BOTTOM_MARGIN: f32 = 120.0;
/// Cursor position on continuation pages.
const CONTINUATION_Y: f32 = 780.0;

/// The two standard Type 1 fonts the report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

// Advance widths for ASCII 32..=126 in 1/1000 em (Adobe core font metrics).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

impl Font {
    /// PostScript base font name.
    #[must_use]
    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Width of `text` in points at `size`.
    ///
    /// Characters outside printable ASCII are measured as `?`, which is how
    /// the encoder emits them.
    #[must_use]
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let table = match self {
            Self::Helvetica => &HELVETICA_WIDTHS,
            Self::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        let units: u32 = text
            .chars()
            .map(|c| {
                let c = if (' '..='~').contains(&c) { c } else { '?' };
                u32::from(table[c as usize - 32])
            })
            .sum();
        units as f32 * size / 1000.0
    }
}

/// One positioned run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f32,
    pub y: f32,
    pub font: Font,
    pub size: f32,
    pub text: String,
}

impl TextLine {
    #[must_use]
    pub fn width(&self) -> f32 {
        self.font.text_width(&self.text, self.size)
    }

    /// Right edge in points.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<TextLine>,
}

/// A fully laid-out report, ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pages: Vec<Page>,
}

impl ReportLayout {
    /// Lay out the report for one prediction.
    ///
    /// Page one carries the title, the four summary lines and the
    /// "Patient Details:" header. Detail lines (`name: value`, in record
    /// order) follow at a fixed line height; when the cursor drops below the
    /// bottom margin the next line starts a new page. Lines wider than the
    /// printable width are word-wrapped.
    #[must_use]
    pub fn compose(result: &PredictionResult, record: &PatientRecord) -> Self {
        let mut first = Page::default();
        first.lines.push(TextLine {
            x: TITLE_X,
            y: TITLE_Y,
            font: Font::HelveticaBold,
            size: TITLE_SIZE,
            text: TITLE.to_string(),
        });

        let summary = [
            format!("Disease: {}", result.disease),
            format!("Risk Probability: {:.2}%", result.probability),
            format!("Risk Level: {}", result.risk),
            format!("Recommendation: {}", result.recommendation),
        ];
        for (text, y) in summary.into_iter().zip(SUMMARY_Y) {
            first.lines.push(body_line(BODY_X, y, text));
        }
        first
            .lines
            .push(body_line(BODY_X, DETAILS_HEADER_Y, "Patient Details:".to_string()));

        let mut pages = vec![first];
        let mut y = DETAIL_START_Y;
        let max_width = PAGE_WIDTH - RIGHT_MARGIN - DETAIL_X;

        for (name, value) in record.iter() {
            let text = format!("{name}: {value}");
            for segment in wrap(&text, Font::Helvetica, BODY_SIZE, max_width) {
                if y < BOTTOM_MARGIN {
                    pages.push(Page::default());
                    y = CONTINUATION_Y;
                }
                if let Some(page) = pages.last_mut() {
                    page.lines.push(body_line(DETAIL_X, y, segment));
                }
                y -= LINE_HEIGHT;
            }
        }

        Self { pages }
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every line across all pages, in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }
}

fn body_line(x: f32, y: f32, text: String) -> TextLine {
    TextLine {
        x,
        y,
        font: Font::Helvetica,
        size: BODY_SIZE,
        text,
    }
}

/// Greedy word wrap; words longer than a full line are split by character.
fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    if font.text_width(text, size) <= max_width {
        return vec![text.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font.text_width(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if font.text_width(&current, size) > max_width {
                current.pop();
                out.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
