//! Core data model types for mentorly.
//!
//! Quizzes and their questions on the assessment side, subscription plans and
//! the feature matrix on the billing side.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// How hard a question (or a generated quiz) is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Point weight a question of this difficulty carries by default.
    pub fn default_points(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// The closed set of question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    FillBlank,
    CodeCompletion,
}

impl QuestionKind {
    /// Whether answers are graded by option index.
    ///
    /// Code completion is graded like multiple choice: the learner picks the
    /// snippet that completes the code.
    pub fn is_choice(self) -> bool {
        !matches!(self, QuestionKind::FillBlank)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple-choice"),
            QuestionKind::TrueFalse => write!(f, "true-false"),
            QuestionKind::FillBlank => write!(f, "fill-blank"),
            QuestionKind::CodeCompletion => write!(f, "code-completion"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "multiple-choice" => Ok(QuestionKind::MultipleChoice),
            "true-false" => Ok(QuestionKind::TrueFalse),
            "fill-blank" => Ok(QuestionKind::FillBlank),
            "code-completion" => Ok(QuestionKind::CodeCompletion),
            other => Err(AssessmentError::InvalidQuestionType(other.to_string())),
        }
    }
}

/// A submitted or expected answer: an option index or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Index(usize),
    Text(String),
}

impl AnswerValue {
    /// The answer as text, with indices rendered in decimal.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            AnswerValue::Index(i) => Cow::Owned(i.to_string()),
            AnswerValue::Text(t) => Cow::Borrowed(t.as_str()),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Index(i) => write!(f, "#{i}"),
            AnswerValue::Text(t) => write!(f, "{t:?}"),
        }
    }
}

impl From<usize> for AnswerValue {
    fn from(index: usize) -> Self {
        AnswerValue::Index(index)
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        AnswerValue::Text(text.to_string())
    }
}

/// One assessable unit of a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, stable across attempts.
    pub id: String,
    /// Question type.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Display text.
    pub prompt: String,
    /// Choice labels; empty for fill-blank questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Option index for choice kinds, expected text for fill-blank.
    pub correct_answer: AnswerValue,
    /// Shown to the learner after grading.
    #[serde(default)]
    pub explanation: String,
    pub difficulty: Difficulty,
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Score weight.
    pub points: u32,
}

/// Largest weight a single question may carry.
pub const MAX_POINTS: u32 = 1_000;

/// Longest allowed quiz time limit: one week.
pub const MAX_TIME_LIMIT_SECS: u64 = 7 * 24 * 60 * 60;

pub(crate) fn default_topic() -> String {
    "general".to_string()
}

impl Question {
    /// Check the answer key against the question kind and its options.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        if self.points == 0 || self.points > MAX_POINTS {
            return Err(AssessmentError::InvalidPoints(self.id.clone()));
        }

        if self.kind.is_choice() {
            if self.options.is_empty() {
                return Err(AssessmentError::MissingOptions(self.id.clone()));
            }
            match &self.correct_answer {
                AnswerValue::Index(i) if *i < self.options.len() => {}
                AnswerValue::Index(i) => {
                    return Err(AssessmentError::InvalidCorrectAnswer {
                        question_id: self.id.clone(),
                        reason: format!(
                            "index {i} out of range for {} options",
                            self.options.len()
                        ),
                    });
                }
                AnswerValue::Text(_) => {
                    return Err(AssessmentError::InvalidCorrectAnswer {
                        question_id: self.id.clone(),
                        reason: format!("{} questions need an option index", self.kind),
                    });
                }
            }
        } else if self.correct_answer.as_text().trim().is_empty() {
            return Err(AssessmentError::InvalidCorrectAnswer {
                question_id: self.id.clone(),
                reason: "expected text is empty".into(),
            });
        }

        Ok(())
    }

    /// Grade a single submitted answer.
    pub fn is_correct(&self, submitted: &AnswerValue) -> bool {
        match self.kind {
            QuestionKind::MultipleChoice
            | QuestionKind::TrueFalse
            | QuestionKind::CodeCompletion => match (submitted, &self.correct_answer) {
                (AnswerValue::Index(given), AnswerValue::Index(expected)) => given == expected,
                _ => false,
            },
            QuestionKind::FillBlank => match submitted {
                AnswerValue::Text(given) => {
                    normalize(given) == normalize(&self.correct_answer.as_text())
                }
                AnswerValue::Index(_) => false,
            },
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// An ordered set of questions plus pass criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub lesson_id: Option<String>,
    /// Display order; scoring ignores it.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Percent threshold, 0..=100.
    pub passing_score: u32,
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

impl Quiz {
    /// Reject quizzes that could not be scored faithfully.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        if self.passing_score > 100 {
            return Err(AssessmentError::InvalidPassingScore(self.passing_score));
        }
        if let Some(limit) = self.time_limit_secs {
            if limit == 0 || limit > MAX_TIME_LIMIT_SECS {
                return Err(AssessmentError::InvalidTimeLimit(limit));
            }
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(AssessmentError::DuplicateQuestionId(question.id.clone()));
            }
            question.validate()?;
        }

        Ok(())
    }

    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Sum of all question weights.
    pub fn total_points(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.points)).sum()
    }
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// Billing period of a subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Month,
    Year,
}

impl fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingInterval::Month => write!(f, "month"),
            BillingInterval::Year => write!(f, "year"),
        }
    }
}

/// Which billing cycle a pricing page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" | "month" => Ok(BillingCycle::Monthly),
            "yearly" | "year" | "annual" => Ok(BillingCycle::Yearly),
            other => Err(format!("unknown billing cycle: {other}")),
        }
    }
}

/// A named subscription tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in major currency units.
    pub price: f64,
    pub interval: BillingInterval,
    /// Human-readable feature list, display only.
    #[serde(default)]
    pub features: Vec<String>,
    /// Payment provider price identifier; empty for free plans.
    #[serde(default)]
    pub price_id: String,
    /// Display hint.
    #[serde(default)]
    pub popular: bool,
}

impl SubscriptionPlan {
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}

/// Plan id to the feature tokens that plan unlocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMatrix(BTreeMap<String, BTreeSet<String>>);

impl FeatureMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plan with its tokens, replacing any previous entry.
    pub fn with_plan<I, S>(mut self, plan_id: &str, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(
            plan_id.to_string(),
            tokens.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Tokens for a plan, if the plan is known.
    pub fn tokens(&self, plan_id: &str) -> Option<&BTreeSet<String>> {
        self.0.get(plan_id)
    }

    pub fn plan_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn contains_plan(&self, plan_id: &str) -> bool {
        self.0.contains_key(plan_id)
    }
}
