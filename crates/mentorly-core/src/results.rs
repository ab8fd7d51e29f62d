//! Result types produced by scoring a quiz.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::AnswerValue;

/// What the learner submitted for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum SubmittedAnswer {
    Answered(AnswerValue),
    Unanswered,
}

impl SubmittedAnswer {
    pub fn is_answered(&self) -> bool {
        matches!(self, SubmittedAnswer::Answered(_))
    }
}

/// Outcome for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub topic: String,
    pub correct: bool,
    pub submitted: SubmittedAnswer,
    pub expected: AnswerValue,
    pub explanation: String,
    pub points_earned: u32,
}

/// Score and per-question breakdown for one set of answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Integer percent, 0..=100.
    pub score: u32,
    pub passed: bool,
    pub earned_points: u64,
    pub total_points: u64,
    /// One entry per question, in quiz order.
    pub results: Vec<QuestionResult>,
}

impl Evaluation {
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.correct).count()
    }
}

/// A finalized scoring event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: Uuid,
    pub quiz_id: String,
    pub answers: BTreeMap<String, AnswerValue>,
    pub score: u32,
    pub passed: bool,
    #[serde(default)]
    pub results: Vec<QuestionResult>,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub time_spent_secs: u64,
    /// Set when the attempt was submitted by the time limit.
    #[serde(default)]
    pub timed_out: bool,
}
