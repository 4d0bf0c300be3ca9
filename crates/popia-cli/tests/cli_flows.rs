//! # CLI Flows
//!
//! Runs the subcommand handlers end to end against files in a temporary
//! directory, the way a compliance officer would use the tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use popia_assessment::{Layout, QuestionSet};
use popia_cli::assess::{run_assess, AssessArgs};
use popia_cli::config::CliConfig;
use popia_cli::questions::answer_template;
use popia_cli::report::{run_report, ReportArgs};
use popia_cli::sanitize::{run_sanitize, SanitizeArgs};
use popia_cli::EXIT_CHECK_FAILED;
use popia_report::REPORT_FILE_NAME;

fn assess_args(answers: PathBuf, fail_under: Option<u8>) -> AssessArgs {
    AssessArgs {
        answers,
        layout: None,
        json: false,
        fail_under,
    }
}

#[test]
fn template_filled_in_then_assessed_and_reported() {
    let dir = tempfile::tempdir().unwrap();

    let template = answer_template(&QuestionSet::standard());
    let filled = template
        .replacen("- ~", "- yes", 4)
        .replacen("- ~", "- no", 2);
    let answers = dir.path().join("answers.yaml");
    std::fs::write(&answers, filled).unwrap();

    let config_path = dir.path().join("popia.yaml");
    std::fs::write(
        &config_path,
        format!(
            "report_title: Acme (Pty) Ltd\noutput_dir: {}\n",
            dir.path().join("out").display()
        ),
    )
    .unwrap();
    let config = CliConfig::load(Some(&config_path)).unwrap();

    // 4 yes at 2 points = 8/12 = 67%.
    assert_eq!(run_assess(&assess_args(answers.clone(), Some(60)), &config).unwrap(), 0);
    assert_eq!(
        run_assess(&assess_args(answers.clone(), Some(70)), &config).unwrap(),
        EXIT_CHECK_FAILED
    );

    let report = ReportArgs {
        answers,
        layout: None,
        date: NaiveDate::from_ymd_opt(2026, 10, 15),
        title: None,
        out: None,
    };
    assert_eq!(run_report(&report, &config).unwrap(), 0);

    let pdf = std::fs::read(dir.path().join("out").join(REPORT_FILE_NAME)).unwrap();
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("(Acme \\(Pty\\) Ltd) Tj"));
    assert!(text.contains("(Overall Score: 67%) Tj"));
    assert!(text.contains("(Identified Risks:) Tj"));
    assert!(text.ends_with("%%EOF\n"));
}

#[test]
fn extended_layout_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let answers = dir.path().join("answers.json");
    std::fs::write(
        &answers,
        r#"{"security": [true, true, true, true, true, true]}"#,
    )
    .unwrap();

    let standard = CliConfig::default();
    assert!(run_assess(&assess_args(answers.clone(), None), &standard).is_err());

    let extended = CliConfig {
        layout: Layout::Extended,
        ..CliConfig::default()
    };
    assert_eq!(run_assess(&assess_args(answers, Some(50)), &extended).unwrap(), 0);
}

#[test]
fn sanitize_uses_configured_policy() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("crm.csv");
    std::fs::write(&list, "Name,Consent_Date,Source\nA,2026-01-01,web\n").unwrap();

    let config = CliConfig::from_yaml("sanitizer_policy: strict\n").unwrap();
    let args = SanitizeArgs {
        files: vec![list],
        policy: None,
        json: true,
    };
    assert_eq!(run_sanitize(&args, &config).unwrap(), 0);
}

#[test]
fn malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("popia.yaml");
    std::fs::write(&path, "sanitizer_policy: lenient\n").unwrap();
    let err = CliConfig::load(Some(&path)).unwrap_err();
    assert!(format!("{err:#}").contains("popia.yaml"));
}
