//! # Tri-State Answers
//!
//! Every question in the questionnaire and both decision-auditor questions
//! start out unanswered. `Answer` keeps that state explicit so that
//! "not yet answered" can never be confused with an explicit "no".
//!
//! ## Wire Format
//!
//! Answers serialize as the snake_case strings `"yes"`, `"no"` and
//! `"unanswered"`. Deserialization is lenient: JSON/YAML booleans, `null`,
//! the integers `1` and `0`, and the literals accepted by
//! [`Answer::from_str`] are all understood.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PopiaError;

/// A tri-state answer to a yes/no question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// No answer given yet. Scores nothing and raises no risk.
    #[default]
    Unanswered,
    /// Affirmative answer.
    Yes,
    /// Negative answer.
    No,
}

/// Answers to the decision auditor share the questionnaire's tri-state shape.
pub type AuditorAnswer = Answer;

impl Answer {
    /// All three states, in declaration order.
    pub const ALL: [Answer; 3] = [Answer::Unanswered, Answer::Yes, Answer::No];

    /// Whether the question has been answered either way.
    pub fn is_answered(&self) -> bool {
        !matches!(self, Self::Unanswered)
    }

    /// The answer as a boolean, or `None` when unanswered.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Unanswered => None,
            Self::Yes => Some(true),
            Self::No => Some(false),
        }
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unanswered => "unanswered",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl From<Option<bool>> for Answer {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unanswered,
            Some(true) => Self::Yes,
            Some(false) => Self::No,
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Self::from(Some(value))
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Answer {
    type Err = PopiaError;

    /// Parse an answer literal, case-insensitively.
    ///
    /// - `yes`, `y`, `true`, `1` → [`Answer::Yes`]
    /// - `no`, `n`, `false`, `0` → [`Answer::No`]
    /// - empty, `unanswered`, `null`, `none`, `-` → [`Answer::Unanswered`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "1" => Ok(Self::Yes),
            "no" | "n" | "false" | "0" => Ok(Self::No),
            "" | "unanswered" | "null" | "none" | "-" => Ok(Self::Unanswered),
            _ => Err(PopiaError::InvalidAnswer(s.to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerRepr {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for Answer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<AnswerRepr>::deserialize(deserializer)? {
            None => Ok(Self::Unanswered),
            Some(AnswerRepr::Flag(flag)) => Ok(Self::from(flag)),
            Some(AnswerRepr::Number(1)) => Ok(Self::Yes),
            Some(AnswerRepr::Number(0)) => Ok(Self::No),
            Some(AnswerRepr::Number(n)) => Err(serde::de::Error::custom(
                PopiaError::InvalidAnswer(n.to_string()),
            )),
            Some(AnswerRepr::Text(text)) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
