//! # `popia assess`
//!
//! Scores an answer sheet against the questionnaire and prints the overall
//! percentage, its band, the per-category breakdown, and the risks raised
//! by every "no" answer.
//!
//! With `--fail-under N` the command exits with code 2 when the score is
//! below `N`, for use as a CI gate.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use popia_assessment::{AnswerSheet, AssessmentResult, ComplianceBand, Layout};
use popia_state::{update, Action, AppState};
use serde::Serialize;

use crate::answers::load_answer_sheet;
use crate::config::CliConfig;
use crate::EXIT_CHECK_FAILED;

/// Arguments for `popia assess`.
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Answer sheet (YAML, or JSON with a .json extension).
    pub answers: PathBuf,

    /// Questionnaire layout (standard or extended). Overrides the config file.
    #[arg(long)]
    pub layout: Option<Layout>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Exit with code 2 if the overall score is below this percentage.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_under: Option<u8>,
}

/// JSON form of an assessment.
#[derive(Debug, Serialize)]
pub struct AssessmentSummary<'a> {
    /// Questionnaire layout that was answered.
    pub layout: Layout,
    /// Band of the overall score.
    pub band: ComplianceBand,
    /// Display message of the band.
    pub message: &'static str,
    /// The scored result, flattened into the summary object.
    #[serde(flatten)]
    pub result: &'a AssessmentResult,
}

/// Execute `popia assess`.
pub fn run_assess(args: &AssessArgs, config: &CliConfig) -> Result<u8> {
    let layout = args.layout.unwrap_or(config.layout);
    let sheet = load_answer_sheet(&args.answers)?;
    let result = assess(&sheet, layout)?;

    if args.json {
        let summary = AssessmentSummary {
            layout,
            band: result.band(),
            message: result.band().message(),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_result(&result));
    }

    match args.fail_under {
        Some(threshold) if result.total_score_percent < threshold => {
            tracing::warn!(
                score = result.total_score_percent,
                threshold,
                "assessment score below threshold"
            );
            Ok(EXIT_CHECK_FAILED)
        }
        _ => Ok(0),
    }
}

/// Answer a fresh `layout` questionnaire from `sheet` and submit it.
///
/// The sheet is checked against the questionnaire first, so a sheet with
/// more answers than questions is an error rather than silently truncated.
pub fn assess(sheet: &AnswerSheet, layout: Layout) -> Result<AssessmentResult> {
    let state = AppState::new(layout, Default::default());
    state
        .questions
        .clone()
        .apply_answers(sheet)
        .with_context(|| format!("answer sheet does not fit the {layout} questionnaire"))?;

    let actions = sheet.0.iter().flat_map(|(category, answers)| {
        answers.iter().enumerate().map(|(index, answer)| Action::Answer {
            category: *category,
            index,
            answer: *answer,
        })
    });
    let state = actions
        .chain([Action::SubmitAssessment])
        .fold(state, update);
    state
        .assessment
        .context("assessment was not recorded after submission")
}

/// Per-category lines `Title: points/max`.
pub fn category_lines(result: &AssessmentResult) -> Vec<String> {
    result
        .per_category
        .iter()
        .map(|(category, s)| format!("{}: {}/{}", category.title(), s.points, s.max_points))
        .collect()
}

/// Human-readable assessment summary.
pub fn format_result(result: &AssessmentResult) -> String {
    let mut lines = vec![
        format!(
            "Overall Score: {}% ({})",
            result.total_score_percent,
            result.band().message()
        ),
        format!("Points: {}/{}", result.total_points, result.max_points),
    ];
    lines.extend(category_lines(result).into_iter().map(|line| format!("  {line}")));
    lines.push(String::new());
    if result.triggered_risks.is_empty() {
        lines.push(popia_report::NO_RISKS_MESSAGE.to_string());
    } else {
        lines.push("Identified Risks:".to_string());
        lines.extend(result.triggered_risks.iter().map(|risk| format!("  - {risk}")));
    }
    crate::join_lines(lines)
}
