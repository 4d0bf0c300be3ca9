//! # Report Layout
//!
//! Projects an [`AssessmentResult`] onto A4 pages. Coordinates are in
//! millimetres from the top-left corner of the page.
//!
//! ## Page 1
//!
//! | y (mm) | Content |
//! |--------|---------|
//! | 20 | title, wrapped onto further lines 8 mm apart |
//! | 30 | date stamp |
//! | 40 | overall score |
//! | 45 | horizontal rule |
//! | 55+ | one line per category, 10 mm apart |
//! | +20 | "Identified Risks:" heading |
//! | +10 | risks, 10 mm apart, or the affirmative line |
//! | 280 | footer (every page) |
//!
//! Each extra title line pushes everything below it down by 8 mm.
//! Risks that would run past [`CONTENT_BOTTOM`] continue on a new page.

use serde::{Deserialize, Serialize};

use popia_assessment::AssessmentResult;

use crate::{ReportContext, FOOTER_TEXT};

/// Page width in millimetres (A4).
pub const PAGE_WIDTH_MM: f32 = 210.0;

/// Page height in millimetres (A4).
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Lowest baseline available to body text.
pub const CONTENT_BOTTOM: f32 = 270.0;

/// Text shown in place of the risk list when no risks were triggered.
pub const NO_RISKS_MESSAGE: &str = "No critical risks identified.";

const MARGIN_LEFT: f32 = 20.0;
const MARGIN_RIGHT: f32 = 190.0;
const LINE_STEP: f32 = 10.0;
const WRAP_STEP: f32 = 5.0;
const FOOTER_Y: f32 = 280.0;
const RISK_WRAP_CHARS: usize = 95;
const TITLE_WRAP_CHARS: usize = 45;
const TITLE_WRAP_STEP: f32 = 8.0;

const TITLE_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 12.0;
const HEADING_SIZE: f32 = 14.0;
const RISK_SIZE: f32 = 10.0;
const FOOTER_SIZE: f32 = 8.0;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const TITLE: Rgb = Rgb(40, 40, 40);
    const RULE: Rgb = Rgb(200, 200, 200);
    const DANGER: Rgb = Rgb(220, 53, 69);
    const SUCCESS: Rgb = Rgb(40, 167, 69);
    const MUTED: Rgb = Rgb(60, 60, 60);
    const FOOTER: Rgb = Rgb(150, 150, 150);
}

/// A drawable item on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// A single line of text; `y` is the baseline.
    Text {
        /// Left edge, mm from the page's left side.
        x: f32,
        /// Baseline, mm from the page's top.
        y: f32,
        /// Font size in points.
        size: f32,
        /// Fill colour.
        color: Rgb,
        /// The line itself, unwrapped.
        text: String,
    },
    /// A horizontal rule.
    Rule {
        /// Start, mm from the left.
        x1: f32,
        /// End, mm from the left.
        x2: f32,
        /// Vertical position, mm from the top.
        y: f32,
        /// Stroke colour.
        color: Rgb,
    },
}

/// One page of the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Drawables in paint order.
    pub elements: Vec<Element>,
}

impl Page {
    fn text(&mut self, y: f32, size: f32, color: Rgb, text: impl Into<String>) {
        self.elements.push(Element::Text {
            x: MARGIN_LEFT,
            y,
            size,
            color,
            text: text.into(),
        });
    }

    /// Text lines in paint order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            Element::Rule { .. } => None,
        })
    }
}

/// A laid-out report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Pages in order; never empty.
    pub pages: Vec<Page>,
}

impl ReportDocument {
    /// All text, one line per text element, pages separated by form feeds.
    pub fn to_plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.lines().collect::<Vec<_>>().join("\n"))
            .collect::<Vec<_>>()
            .join("\n\u{c}\n")
    }
}

/// Lay out `result` for printing.
pub fn layout(result: &AssessmentResult, ctx: &ReportContext) -> ReportDocument {
    let mut pages = Vec::new();
    let mut page = Page::default();

    let mut title_y = 20.0;
    for (i, line) in wrap(&ctx.title, TITLE_WRAP_CHARS).into_iter().enumerate() {
        if i > 0 {
            title_y += TITLE_WRAP_STEP;
        }
        page.text(title_y, TITLE_SIZE, Rgb::TITLE, line);
    }
    let shift = title_y - 20.0;

    page.text(
        30.0 + shift,
        BODY_SIZE,
        Rgb::TITLE,
        format!("Date: {}", ctx.date.format("%Y-%m-%d")),
    );
    page.text(
        40.0 + shift,
        BODY_SIZE,
        Rgb::TITLE,
        format!("Overall Score: {}%", result.total_score_percent),
    );
    page.elements.push(Element::Rule {
        x1: MARGIN_LEFT,
        x2: MARGIN_RIGHT,
        y: 45.0 + shift,
        color: Rgb::RULE,
    });

    let mut y = 55.0 + shift;
    for (category, subscore) in &result.per_category {
        page.text(
            y,
            BODY_SIZE,
            Rgb::TITLE,
            format!("{}: {}/{}", category.title(), subscore.points, subscore.max_points),
        );
        y += LINE_STEP;
    }

    y += LINE_STEP;
    page.text(y, HEADING_SIZE, Rgb::DANGER, "Identified Risks:");
    y += LINE_STEP;

    if result.triggered_risks.is_empty() {
        page.text(y, RISK_SIZE, Rgb::SUCCESS, NO_RISKS_MESSAGE);
    } else {
        for risk in &result.triggered_risks {
            let wrapped = wrap(risk, RISK_WRAP_CHARS);
            let height = WRAP_STEP * (wrapped.len() - 1) as f32;
            if y + height > CONTENT_BOTTOM {
                pages.push(std::mem::take(&mut page));
                y = 20.0;
            }
            for (i, line) in wrapped.iter().enumerate() {
                let text = if i == 0 {
                    format!("\u{2022} {line}")
                } else {
                    format!("  {line}")
                };
                page.text(y, RISK_SIZE, Rgb::MUTED, text);
                if i + 1 < wrapped.len() {
                    y += WRAP_STEP;
                }
            }
            y += LINE_STEP;
        }
    }
    pages.push(page);

    let total = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        let footer = if total > 1 {
            format!("{FOOTER_TEXT} - Page {} of {total}", i + 1)
        } else {
            FOOTER_TEXT.to_string()
        };
        page.text(FOOTER_Y, FOOTER_SIZE, Rgb::FOOTER, footer);
    }

    ReportDocument { pages }
}

/// Greedy word wrap by character count. Words longer than `width` are kept whole.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
