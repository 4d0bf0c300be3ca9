//! # Questionnaire Scoring
//!
//! `score()` walks a [`QuestionSet`] category by category:
//!
//! - **yes** adds the set's per-question weight to the category subscore;
//! - **no** appends the question's risk label to the triggered risks;
//! - **unanswered** contributes nothing and raises no risk.
//!
//! The overall score is `round(points / MAX_POINTS × 100)`, rounded half-up.
//! The result is derived wholesale on every call; nothing is accumulated
//! between calls.

use std::collections::BTreeMap;

use popia_core::{rounded_percent, Answer, Category};
use serde::{Deserialize, Serialize};

use crate::band::ComplianceBand;
use crate::questionnaire::QuestionSet;

/// Points earned within one category, with that category's maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Points earned from "yes" answers.
    pub points: u32,
    /// Points attainable if every question in the category were "yes".
    pub max_points: u32,
}

/// The outcome of scoring a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Overall score, 0–100.
    pub total_score_percent: u8,
    /// Sum of all category points.
    pub total_points: u32,
    /// Maximum attainable points.
    pub max_points: u32,
    /// Subscore per category, in reporting order.
    pub per_category: BTreeMap<Category, CategoryScore>,
    /// Risk labels of "no" answers, category by category in question order.
    pub triggered_risks: Vec<String>,
}

impl AssessmentResult {
    /// The band the overall score falls into.
    pub fn band(&self) -> ComplianceBand {
        ComplianceBand::from_percent(self.total_score_percent)
    }

    /// Points earned in `category`, or 0 if absent.
    pub fn category_points(&self, category: Category) -> u32 {
        self.per_category.get(&category).map_or(0, |s| s.points)
    }
}

/// Score a question set. Pure and idempotent.
pub fn score(set: &QuestionSet) -> AssessmentResult {
    let weight = set.weight();
    let mut per_category = BTreeMap::new();
    let mut triggered_risks = Vec::new();

    for (category, questions) in set.iter() {
        let mut points = 0;
        for question in questions {
            match question.answer {
                Answer::Yes => points += weight,
                Answer::No => triggered_risks.push(question.risk_label.clone()),
                Answer::Unanswered => {}
            }
        }
        per_category.insert(
            category,
            CategoryScore {
                points,
                max_points: set.category_max(category),
            },
        );
    }

    let total_points: u32 = per_category.values().map(|s| s.points).sum();
    let max_points = set.max_points();
    let total_score_percent = rounded_percent(u64::from(total_points), u64::from(max_points));

    tracing::debug!(
        total_points,
        max_points,
        total_score_percent,
        risks = triggered_risks.len(),
        "scored questionnaire"
    );

    AssessmentResult {
        total_score_percent,
        total_points,
        max_points,
        per_category,
        triggered_risks,
    }
}
