//! # popia-report: Assessment Report Rendering
//!
//! Turns an [`AssessmentResult`] into a printable, paginated document.
//!
//! ## Pipeline
//!
//! 1. [`layout()`] projects the result onto A4 pages of positioned text and
//!    rules (`layout.rs`). This step is pure and deterministic: the same
//!    result and context always produce the same pages.
//! 2. [`pdf::write_pdf()`] serializes those pages as PDF 1.4 using the
//!    built-in Helvetica font (`pdf.rs`).
//!
//! ## Invariants
//!
//! - The renderer prints exactly the result it is given. It never rescores
//!   answers or recomputes percentages.
//! - The date stamp and the overall score are always on the first page.
//! - An empty risk list renders [`NO_RISKS_MESSAGE`], never an empty section.
//! - Every page carries the fixed footer.

pub mod layout;
pub mod pdf;

use chrono::NaiveDate;
use popia_assessment::AssessmentResult;
use serde::{Deserialize, Serialize};

pub use layout::{layout, Element, Page, ReportDocument, Rgb, NO_RISKS_MESSAGE};

/// File name under which the report is offered for download.
pub const REPORT_FILE_NAME: &str = "POPIA-Assessment-Report.pdf";

/// Default report title.
pub const DEFAULT_TITLE: &str = "POPI Checkup Lite - Assessment Report";

/// Fixed footer line.
pub const FOOTER_TEXT: &str = "Generated by POPI Checkup Lite";

/// Presentation inputs that are not part of the assessment itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportContext {
    /// Heading on the first page.
    pub title: String,
    /// Date stamp printed under the title.
    pub date: NaiveDate,
}

impl ReportContext {
    /// Context with the default title.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            date,
        }
    }

    /// Context dated today (local calendar date).
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

/// Render `result` as PDF bytes.
pub fn render(result: &AssessmentResult, ctx: &ReportContext) -> Vec<u8> {
    let document = layout(result, ctx);
    let bytes = pdf::write_pdf(&document);
    tracing::debug!(
        pages = document.pages.len(),
        bytes = bytes.len(),
        "rendered assessment report"
    );
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use popia_assessment::{score, AnswerSheet, QuestionSet};
    use popia_core::{Answer, Category};

    fn ctx() -> ReportContext {
        ReportContext::new(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap())
    }

    #[test]
    fn test_render_is_deterministic() {
        let result = score(&QuestionSet::standard());
        assert_eq!(render(&result, &ctx()), render(&result, &ctx()));
    }

    #[test]
    fn test_render_contains_score_and_date() {
        let mut set = QuestionSet::standard();
        set.apply_answers(
            &AnswerSheet::new()
                .with(Category::Security, vec![Answer::Yes; 3])
                .with(Category::Offences, vec![Answer::No; 3]),
        )
        .unwrap();
        let pdf = render(&score(&set), &ctx());
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("(Overall Score: 50%) Tj"));
        assert!(text.contains("(Date: 2026-10-15) Tj"));
        assert!(text.contains("(Chapter 8 \\(Security & Marketing\\): 6/6) Tj"));
    }

    #[test]
    fn test_report_file_name_is_fixed() {
        assert_eq!(REPORT_FILE_NAME, "POPIA-Assessment-Report.pdf");
    }
}
