//! # `popia report`
//!
//! Scores an answer sheet and writes the PDF assessment report, by default
//! as `POPIA-Assessment-Report.pdf` in the output directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use popia_assessment::Layout;
use popia_report::{render, ReportContext, REPORT_FILE_NAME};

use crate::answers::load_answer_sheet;
use crate::assess::assess;
use crate::config::CliConfig;

/// Arguments for `popia report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Answer sheet (YAML, or JSON with a .json extension).
    pub answers: PathBuf,

    /// Questionnaire layout (standard or extended). Overrides the config file.
    #[arg(long)]
    pub layout: Option<Layout>,

    /// Date stamp printed on the report (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Report heading. Overrides the config file.
    #[arg(long)]
    pub title: Option<String>,

    /// Output file. Defaults to the fixed report name in the output directory.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute `popia report`.
pub fn run_report(args: &ReportArgs, config: &CliConfig) -> Result<u8> {
    let layout = args.layout.unwrap_or(config.layout);
    let sheet = load_answer_sheet(&args.answers)?;
    let result = assess(&sheet, layout)?;

    let mut ctx = match args.date {
        Some(date) => ReportContext::new(date),
        None => ReportContext::today(),
    };
    ctx.title = args
        .title
        .clone()
        .unwrap_or_else(|| config.report_title.clone());

    let path = args
        .out
        .clone()
        .unwrap_or_else(|| config.output_dir().join(REPORT_FILE_NAME));
    let bytes = render(&result, &ctx);
    write_report(&path, &bytes)?;

    println!("  score:  {}%", result.total_score_percent);
    println!("  risks:  {}", result.triggered_risks.len());
    println!("  report: {}", path.display());
    Ok(0)
}

fn write_report(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote assessment report");
    Ok(())
}
