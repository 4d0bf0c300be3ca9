//! # `popia questions`
//!
//! Prints the questionnaire for a layout, or with `--template` an answer
//! sheet with every question unanswered, ready to fill in and pass to
//! `popia assess`.

use anyhow::Result;
use clap::Args;
use popia_assessment::{Layout, QuestionSet};

use crate::config::CliConfig;

/// Arguments for `popia questions`.
#[derive(Args, Debug)]
pub struct QuestionsArgs {
    /// Questionnaire layout (standard or extended). Overrides the config file.
    #[arg(long)]
    pub layout: Option<Layout>,

    /// Print a YAML answer-sheet template instead of the question list.
    #[arg(long)]
    pub template: bool,
}

/// Execute `popia questions`.
pub fn run_questions(args: &QuestionsArgs, config: &CliConfig) -> Result<u8> {
    let set = args.layout.unwrap_or(config.layout).question_set();
    if args.template {
        print!("{}", answer_template(&set));
    } else {
        print!("{}", format_questions(&set));
    }
    Ok(0)
}

/// Numbered question list grouped by category.
pub fn format_questions(set: &QuestionSet) -> String {
    let mut lines = Vec::new();
    for (category, questions) in set.iter() {
        lines.push(format!(
            "{} [{} pts max]",
            category.title(),
            set.category_max(category)
        ));
        lines.extend(
            questions
                .iter()
                .enumerate()
                .map(|(i, question)| format!("  {}. {}", i + 1, question.prompt)),
        );
        lines.push(String::new());
    }
    lines.push(format!(
        "{} questions, {} points each, {} points total.",
        set.question_count(),
        set.weight(),
        set.max_points()
    ));
    crate::join_lines(lines)
}

/// YAML answer sheet with every question unanswered and its prompt as a comment.
pub fn answer_template(set: &QuestionSet) -> String {
    let mut lines = vec!["# Answer each question with yes, no, or ~ (unanswered).".to_string()];
    for (category, questions) in set.iter() {
        lines.push(format!("{}:", category.as_str()));
        for question in questions {
            lines.push(format!("  # {}", question.prompt));
            lines.push("  - ~".to_string());
        }
    }
    crate::join_lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use popia_assessment::AnswerSheet;
    use popia_core::{Answer, Category};

    #[test]
    fn test_standard_question_list() {
        let text = format_questions(&QuestionSet::standard());
        assert!(text.contains("Chapter 8 (Security & Marketing) [6 pts max]"));
        assert!(text.contains("Chapter 11 (Offences) [6 pts max]"));
        assert!(text.contains("  1. Do you suppress marketing"));
        assert!(text.ends_with("6 questions, 2 points each, 12 points total.\n"));
    }

    #[test]
    fn test_extended_question_list() {
        let text = format_questions(&QuestionSet::extended());
        assert!(text.contains("  6. "));
        assert!(text.ends_with("12 questions, 1 points each, 12 points total.\n"));
    }

    #[test]
    fn test_template_parses_as_empty_sheet() {
        let set = QuestionSet::extended();
        let sheet: AnswerSheet = serde_yaml::from_str(&answer_template(&set)).unwrap();
        for category in Category::ALL {
            assert_eq!(sheet.get(category), vec![Answer::Unanswered; 6]);
        }
        let mut filled = set.clone();
        filled.apply_answers(&sheet).unwrap();
        assert_eq!(filled, set);
    }
}
