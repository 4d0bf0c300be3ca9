//! # Questionnaire: Fixed Question Sets
//!
//! Defines `Question`, `QuestionSet`, and the two built-in layouts:
//!
//! | Layout | Questions | Weight | Max |
//! |--------|-----------|--------|-----|
//! | [`Layout::Standard`] | 3 per category | 2 points | 12 |
//! | [`Layout::Extended`] | 6 per category | 1 point  | 12 |
//!
//! ## Weight Invariant
//!
//! A question set's total weight (`weight × question count`) must equal
//! [`MAX_POINTS`]. The only constructor, [`QuestionSet::new`], enforces this,
//! and deserialization routes through the same constructor, so a set with a
//! mismatched maximum cannot exist.
//!
//! The question text is hard-coded and not configurable at runtime. Only the
//! answers change during a session.

use std::collections::BTreeMap;
use std::str::FromStr;

use popia_core::{Answer, Category};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum attainable points for any question set.
pub const MAX_POINTS: u32 = 12;

/// Errors raised while building or answering a question set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestionnaireError {
    /// The per-question weight was zero.
    #[error("per-question weight must be positive")]
    ZeroWeight,

    /// A category had no questions.
    #[error("category {0} has no questions")]
    MissingCategory(Category),

    /// Total weight did not equal the fixed maximum.
    #[error("total weight {actual} does not equal the fixed maximum of {expected} points")]
    WeightMismatch {
        /// The required total ([`MAX_POINTS`]).
        expected: u32,
        /// The total implied by the question set.
        actual: u32,
    },

    /// An answer addressed a question that does not exist.
    #[error("question {index} is out of range for category {category} ({len} questions)")]
    QuestionOutOfRange {
        /// Category addressed.
        category: Category,
        /// Zero-based index addressed.
        index: usize,
        /// Number of questions in the category.
        len: usize,
    },

    /// A layout name could not be parsed.
    #[error("unknown layout: {0:?} (expected standard or extended)")]
    UnknownLayout(String),
}

/// A single yes/no question with the risk it surfaces when answered "no".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question shown to the user.
    pub prompt: String,
    /// Description of the risk raised by a negative answer.
    pub risk_label: String,
    /// Current answer.
    #[serde(default)]
    pub answer: Answer,
}

impl Question {
    /// Create an unanswered question.
    pub fn new(prompt: impl Into<String>, risk_label: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            risk_label: risk_label.into(),
            answer: Answer::Unanswered,
        }
    }
}

/// Which built-in parameterization of the questionnaire to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Six questions at two points each.
    #[default]
    Standard,
    /// Twelve questions at one point each.
    Extended,
}

impl Layout {
    /// Build a fresh, fully unanswered question set for this layout.
    pub fn question_set(&self) -> QuestionSet {
        match self {
            Self::Standard => QuestionSet::standard(),
            Self::Extended => QuestionSet::extended(),
        }
    }

    /// Returns the snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Extended => "extended",
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = QuestionnaireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "extended" => Ok(Self::Extended),
            _ => Err(QuestionnaireError::UnknownLayout(s.to_string())),
        }
    }
}

/// Answers keyed by category, in question order.
///
/// This is the external form of a user's answers: the CLI reads it from
/// YAML or JSON, e.g.
///
/// ```yaml
/// security: [yes, yes, no]
/// offences: [true, ~, false]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(pub BTreeMap<Category, Vec<Answer>>);

impl AnswerSheet {
    /// An empty sheet: applying it changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for one category's answers.
    pub fn with(mut self, category: Category, answers: Vec<Answer>) -> Self {
        self.0.insert(category, answers);
        self
    }

    /// Answers for `category`, or an empty slice.
    pub fn get(&self, category: Category) -> &[Answer] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// An ordered, validated questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionSetRepr", into = "QuestionSetRepr")]
pub struct QuestionSet {
    weight: u32,
    categories: BTreeMap<Category, Vec<Question>>,
}

#[derive(Serialize, Deserialize)]
struct QuestionSetRepr {
    weight: u32,
    categories: BTreeMap<Category, Vec<Question>>,
}

impl TryFrom<QuestionSetRepr> for QuestionSet {
    type Error = QuestionnaireError;

    fn try_from(repr: QuestionSetRepr) -> Result<Self, Self::Error> {
        QuestionSet::new(repr.weight, repr.categories)
    }
}

impl From<QuestionSet> for QuestionSetRepr {
    fn from(set: QuestionSet) -> Self {
        Self {
            weight: set.weight,
            categories: set.categories,
        }
    }
}

impl QuestionSet {
    /// Build a question set, enforcing the weight invariant.
    ///
    /// # Errors
    ///
    /// - [`QuestionnaireError::ZeroWeight`] if `weight` is 0.
    /// - [`QuestionnaireError::MissingCategory`] if any [`Category`] has no questions.
    /// - [`QuestionnaireError::WeightMismatch`] if `weight × questions != MAX_POINTS`.
    pub fn new(
        weight: u32,
        categories: BTreeMap<Category, Vec<Question>>,
    ) -> Result<Self, QuestionnaireError> {
        if weight == 0 {
            return Err(QuestionnaireError::ZeroWeight);
        }
        for category in Category::ALL {
            if categories.get(&category).map_or(true, Vec::is_empty) {
                return Err(QuestionnaireError::MissingCategory(category));
            }
        }
        let count: usize = categories.values().map(Vec::len).sum();
        let actual = weight.saturating_mul(count as u32);
        if actual != MAX_POINTS {
            return Err(QuestionnaireError::WeightMismatch {
                expected: MAX_POINTS,
                actual,
            });
        }
        Ok(Self { weight, categories })
    }

    /// The six-question layout at two points per question.
    pub fn standard() -> Self {
        Self::builtin(2, standard_security(), standard_offences())
    }

    /// The twelve-question layout at one point per question.
    pub fn extended() -> Self {
        let mut security = standard_security();
        security.extend(extended_security());
        let mut offences = standard_offences();
        offences.extend(extended_offences());
        Self::builtin(1, security, offences)
    }

    fn builtin(weight: u32, security: Vec<Question>, offences: Vec<Question>) -> Self {
        let categories = BTreeMap::from([
            (Category::Security, security),
            (Category::Offences, offences),
        ]);
        // Built-in layouts satisfy the weight invariant; see the layout tests.
        Self { weight, categories }
    }

    /// Points awarded per "yes" answer.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Sum of weights over every question. Always [`MAX_POINTS`].
    pub fn max_points(&self) -> u32 {
        self.weight * self.question_count() as u32
    }

    /// Maximum attainable points within one category.
    pub fn category_max(&self, category: Category) -> u32 {
        self.weight * self.questions(category).len() as u32
    }

    /// Total number of questions across all categories.
    pub fn question_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// The questions of one category, in order.
    pub fn questions(&self, category: Category) -> &[Question] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate categories in reporting order with their questions.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Question])> {
        self.categories.iter().map(|(c, qs)| (*c, qs.as_slice()))
    }

    /// Whether every question has been answered.
    pub fn is_complete(&self) -> bool {
        self.categories
            .values()
            .flatten()
            .all(|q| q.answer.is_answered())
    }

    /// Set the answer of one question.
    pub fn answer(
        &mut self,
        category: Category,
        index: usize,
        answer: Answer,
    ) -> Result<(), QuestionnaireError> {
        let questions = self
            .categories
            .get_mut(&category)
            .ok_or(QuestionnaireError::MissingCategory(category))?;
        let len = questions.len();
        let question = questions
            .get_mut(index)
            .ok_or(QuestionnaireError::QuestionOutOfRange {
                category,
                index,
                len,
            })?;
        question.answer = answer;
        Ok(())
    }

    /// Apply an [`AnswerSheet`].
    ///
    /// The sheet is validated in full before any answer is written, so a
    /// sheet with an out-of-range entry leaves the set untouched. Questions
    /// the sheet does not cover keep their current answer.
    pub fn apply_answers(&mut self, sheet: &AnswerSheet) -> Result<(), QuestionnaireError> {
        for (category, answers) in &sheet.0 {
            let len = self.questions(*category).len();
            if answers.len() > len {
                return Err(QuestionnaireError::QuestionOutOfRange {
                    category: *category,
                    index: len,
                    len,
                });
            }
        }
        for (category, answers) in &sheet.0 {
            for (index, answer) in answers.iter().enumerate() {
                self.answer(*category, index, *answer)?;
            }
        }
        Ok(())
    }

    /// Export the current answers.
    pub fn answer_sheet(&self) -> AnswerSheet {
        AnswerSheet(
            self.categories
                .iter()
                .map(|(c, qs)| (*c, qs.iter().map(|q| q.answer).collect()))
                .collect(),
        )
    }

    /// Clear every answer back to unanswered.
    pub fn reset(&mut self) {
        for question in self.categories.values_mut().flatten() {
            question.answer = Answer::Unanswered;
        }
    }
}

fn standard_security() -> Vec<Question> {
    vec![
        Question::new(
            "Do you suppress marketing to users who have opted out (Opt-Out Registry)?",
            "Violation of Chapter 8 (Direct Marketing) rights.",
        ),
        Question::new(
            "Do you have proof of consent (Opt-In) for all new contacts?",
            "Section 69 Violation: Unsolicited electronic communication.",
        ),
        Question::new(
            "Are unsubscribe links functioning and tested monthly?",
            "Failure to provide means to object (Section 69).",
        ),
    ]
}

fn standard_offences() -> Vec<Question> {
    vec![
        Question::new(
            "Is your Information Officer registered with the Regulator?",
            "Non-compliance with Officer duties (Section 55/56).",
        ),
        Question::new(
            "Do you have a procedure to prevent obstruction of a Regulator search?",
            "Risk of criminal offence (Section 102 - Obstruction).",
        ),
        Question::new(
            "Do you ensure no false evidence is given to the Regulator during audits?",
            "Risk of criminal offence (Section 104 - False Evidence).",
        ),
    ]
}

fn extended_security() -> Vec<Question> {
    vec![
        Question::new(
            "Does every marketing message identify the sender and give contact details?",
            "Section 69(4) Violation: Marketing messages lack sender identification.",
        ),
        Question::new(
            "Do you approach non-customers for marketing consent only once?",
            "Section 69(2) Violation: Repeated consent requests to non-customers.",
        ),
        Question::new(
            "Is marketing to existing customers limited to your own similar products or services?",
            "Section 69(3) Violation: Customer marketing outside similar products or services.",
        ),
    ]
}

fn extended_offences() -> Vec<Question> {
    vec![
        Question::new(
            "Do you act on every enforcement notice issued by the Regulator?",
            "Risk of criminal offence (Section 103 - Failure to comply with enforcement notice).",
        ),
        Question::new(
            "Are data subjects' account numbers protected from unlawful disclosure?",
            "Risk of criminal offence (Section 105/106 - Unlawful acts relating to account numbers).",
        ),
        Question::new(
            "Do you keep information obtained from the Regulator confidential?",
            "Risk of criminal offence (Section 101 - Breach of confidentiality).",
        ),
    ]
}
