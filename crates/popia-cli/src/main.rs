//! # popia CLI entry point
//!
//! Parses command-line arguments, loads the optional configuration file,
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use popia_cli::assess::{run_assess, AssessArgs};
use popia_cli::audit::{run_audit, AuditArgs};
use popia_cli::config::CliConfig;
use popia_cli::digest::{run_digest, DigestArgs};
use popia_cli::questions::{run_questions, QuestionsArgs};
use popia_cli::report::{run_report, ReportArgs};
use popia_cli::sanitize::{run_sanitize, SanitizeArgs};

/// POPI Checkup Lite: POPIA compliance self-assessment.
///
/// Scores the compliance questionnaire, writes the PDF assessment report,
/// checks marketing lists for consent, and audits automated decisions.
#[derive(Parser, Debug)]
#[command(name = "popia", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for generated files.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the questionnaire or an answer-sheet template.
    Questions(QuestionsArgs),

    /// Score an answer sheet.
    Assess(AssessArgs),

    /// Write the PDF assessment report.
    Report(ReportArgs),

    /// Classify marketing contact lists by consent.
    Sanitize(SanitizeArgs),

    /// Section 71 automated decision-making check.
    Audit(AuditArgs),

    /// Compute a local integrity receipt for a file.
    Digest(DigestArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("popia CLI starting");

    let mut config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = Some(dir);
    }

    let result = match cli.command {
        Commands::Questions(args) => run_questions(&args, &config),
        Commands::Assess(args) => run_assess(&args, &config),
        Commands::Report(args) => run_report(&args, &config),
        Commands::Sanitize(args) => run_sanitize(&args, &config),
        Commands::Audit(args) => run_audit(&args, &config),
        Commands::Digest(args) => run_digest(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popia_assessment::Layout;
    use popia_core::Answer;
    use popia_sanitizer::SanitizerPolicy;

    #[test]
    fn cli_parse_questions_template() {
        let cli = Cli::try_parse_from(["popia", "questions", "--template"]).unwrap();
        if let Commands::Questions(args) = cli.command {
            assert!(args.template);
            assert!(args.layout.is_none());
        } else {
            panic!("expected questions");
        }
    }

    #[test]
    fn cli_parse_assess_with_options() {
        let cli = Cli::try_parse_from([
            "popia",
            "assess",
            "answers.yaml",
            "--layout",
            "extended",
            "--json",
            "--fail-under",
            "80",
        ])
        .unwrap();
        if let Commands::Assess(args) = cli.command {
            assert_eq!(args.answers, PathBuf::from("answers.yaml"));
            assert_eq!(args.layout, Some(Layout::Extended));
            assert!(args.json);
            assert_eq!(args.fail_under, Some(80));
        } else {
            panic!("expected assess");
        }
    }

    #[test]
    fn cli_parse_assess_rejects_threshold_over_100() {
        assert!(Cli::try_parse_from(["popia", "assess", "a.yaml", "--fail-under", "101"]).is_err());
    }

    #[test]
    fn cli_parse_rejects_unknown_layout() {
        assert!(Cli::try_parse_from(["popia", "assess", "a.yaml", "--layout", "compact"]).is_err());
    }

    #[test]
    fn cli_parse_report_date() {
        let cli = Cli::try_parse_from([
            "popia",
            "report",
            "answers.yaml",
            "--date",
            "2026-10-15",
            "--title",
            "Acme",
        ])
        .unwrap();
        if let Commands::Report(args) = cli.command {
            assert_eq!(args.date, chrono::NaiveDate::from_ymd_opt(2026, 10, 15));
            assert_eq!(args.title.as_deref(), Some("Acme"));
            assert!(args.out.is_none());
        } else {
            panic!("expected report");
        }
    }

    #[test]
    fn cli_parse_report_rejects_bad_date() {
        assert!(Cli::try_parse_from(["popia", "report", "a.yaml", "--date", "15/10/2026"]).is_err());
    }

    #[test]
    fn cli_parse_sanitize_multiple_files() {
        let cli = Cli::try_parse_from([
            "popia", "sanitize", "a.csv", "b.csv", "--policy", "strict",
        ])
        .unwrap();
        if let Commands::Sanitize(args) = cli.command {
            assert_eq!(args.files.len(), 2);
            assert_eq!(args.policy, Some(SanitizerPolicy::Strict));
        } else {
            panic!("expected sanitize");
        }
    }

    #[test]
    fn cli_parse_sanitize_requires_file() {
        assert!(Cli::try_parse_from(["popia", "sanitize"]).is_err());
    }

    #[test]
    fn cli_parse_audit_defaults_unanswered() {
        let cli = Cli::try_parse_from(["popia", "audit"]).unwrap();
        if let Commands::Audit(args) = cli.command {
            assert_eq!(args.automated, Answer::Unanswered);
            assert_eq!(args.human_review, Answer::Unanswered);
        } else {
            panic!("expected audit");
        }
    }

    #[test]
    fn cli_parse_audit_answers() {
        let cli = Cli::try_parse_from([
            "popia",
            "audit",
            "--automated",
            "YES",
            "--human-review",
            "n",
        ])
        .unwrap();
        if let Commands::Audit(args) = cli.command {
            assert_eq!(args.automated, Answer::Yes);
            assert_eq!(args.human_review, Answer::No);
        } else {
            panic!("expected audit");
        }
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "popia",
            "digest",
            "file.csv",
            "-vv",
            "--config",
            "popia.yaml",
            "--output-dir",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("popia.yaml")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert!(matches!(cli.command, Commands::Digest(_)));
    }
}
