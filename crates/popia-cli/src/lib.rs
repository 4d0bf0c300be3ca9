//! # popia-cli: Command-Line Front End for POPIA Checkup
//!
//! Provides the `popia` binary. Each subcommand drives the same library
//! crates a graphical front end would: answers flow through
//! `popia_state::update`, and uploaded lists get their integrity digest from
//! the upload supervisor.
//!
//! ## Subcommands
//!
//! - `popia questions`: Print the questionnaire, or an answer-sheet template.
//! - `popia assess`: Score an answer sheet.
//! - `popia report`: Write the PDF assessment report.
//! - `popia sanitize`: Classify marketing contact lists by consent.
//! - `popia audit`: Section 71 automated decision-making verdict.
//! - `popia digest`: Local SHA-256 integrity receipt of a file.
//!
//! ```bash
//! popia questions --template > answers.yaml
//! popia assess answers.yaml --fail-under 80
//! popia report answers.yaml --date 2026-10-15
//! popia sanitize contacts.csv --policy strict --json
//! popia audit --automated yes --human-review no
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | error (unreadable input, invalid answers, I/O failure) |
//! | 2 | the check ran and failed (score below threshold, violation, digest mismatch) |

pub mod answers;
pub mod assess;
pub mod audit;
pub mod config;
pub mod digest;
pub mod questions;
pub mod report;
pub mod sanitize;

/// Exit code for a check that ran and did not pass.
pub const EXIT_CHECK_FAILED: u8 = 2;

/// Terminate every line with `\n` and concatenate.
pub(crate) fn join_lines<I>(lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    lines.into_iter().map(|line| line + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lines_terminates_each_line() {
        assert_eq!(join_lines(vec!["a".to_string(), String::new(), "b".into()]), "a\n\nb\n");
        assert_eq!(join_lines(Vec::new()), "");
    }
}
