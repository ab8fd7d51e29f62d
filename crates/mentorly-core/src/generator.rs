//! Question bank and adaptive quiz generation.
//!
//! The bank holds template questions keyed by topic, kind and difficulty.
//! Generation walks the requested kinds round-robin and picks entries
//! deterministically, so the same bank and request yield the same prompts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AssessmentError;
use crate::evaluator::select_next_difficulty;
use crate::model::{AnswerValue, Difficulty, Question, QuestionKind, Quiz};
use crate::results::Attempt;
use crate::statistics::weak_topics;

/// Questions per adaptive quiz.
pub const ADAPTIVE_QUESTION_COUNT: usize = 10;
/// Adaptive quizzes allow 20 minutes.
pub const ADAPTIVE_TIME_LIMIT_SECS: u64 = 20 * 60;
pub const ADAPTIVE_PASSING_SCORE: u32 = 70;
pub const ADAPTIVE_MAX_ATTEMPTS: u32 = 3;

/// A template question in the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankEntry {
    pub topic: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// `None` means the entry suits any difficulty.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: AnswerValue,
    #[serde(default)]
    pub explanation: String,
}

/// What to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_count: usize,
    pub question_types: Vec<QuestionKind>,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
}

/// Template questions, with a fallback topic for unknown subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub default_topic: String,
    pub entries: Vec<BankEntry>,
}

impl QuestionBank {
    pub fn new(default_topic: impl Into<String>, entries: Vec<BankEntry>) -> Self {
        Self {
            default_topic: default_topic.into(),
            entries,
        }
    }

    /// Entries usable for a (topic, kind, difficulty) slot.
    ///
    /// Falls back from an exact match to any difficulty on the same topic,
    /// then to the default topic.
    pub fn candidates(
        &self,
        topic: &str,
        kind: QuestionKind,
        difficulty: Difficulty,
    ) -> Vec<&BankEntry> {
        let lookup = |topic: &str| -> Vec<&BankEntry> {
            let on_topic: Vec<&BankEntry> = self
                .entries
                .iter()
                .filter(|e| e.kind == kind && e.topic.eq_ignore_ascii_case(topic))
                .collect();

            let exact: Vec<&BankEntry> = on_topic
                .iter()
                .copied()
                .filter(|e| e.difficulty.is_none() || e.difficulty == Some(difficulty))
                .collect();

            if exact.is_empty() {
                on_topic
            } else {
                exact
            }
        };

        let found = lookup(topic);
        if found.is_empty() && !topic.eq_ignore_ascii_case(&self.default_topic) {
            tracing::debug!(topic, %kind, "no bank entries, using default topic");
            return lookup(&self.default_topic);
        }
        found
    }

    /// Build `question_count` questions for the request.
    pub fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, AssessmentError> {
        if request.question_types.is_empty() {
            return Err(AssessmentError::NoQuestionsAvailable(
                "an empty list of question types".into(),
            ));
        }

        let kinds = request.question_types.len();
        let mut questions = Vec::with_capacity(request.question_count);

        for i in 0..request.question_count {
            let kind = request.question_types[i % kinds];
            let candidates = self.candidates(&request.topic, kind, request.difficulty);
            if candidates.is_empty() {
                return Err(AssessmentError::NoQuestionsAvailable(format!(
                    "{kind} questions on {}",
                    request.topic
                )));
            }
            let entry = candidates[(i / kinds) % candidates.len()];
            // A fallback entry keeps its own tier and the points that go with it.
            let difficulty = entry.difficulty.unwrap_or(request.difficulty);

            let question = Question {
                id: format!("q_{}", Uuid::new_v4().simple()),
                kind,
                prompt: entry.prompt.clone(),
                options: entry.options.clone(),
                correct_answer: entry.correct_answer.clone(),
                explanation: entry.explanation.clone(),
                difficulty,
                topic: entry.topic.clone(),
                points: difficulty.default_points(),
            };
            question.validate()?;
            questions.push(question);
        }

        Ok(questions)
    }
}

/// Build a personalized quiz from a learner's attempt history.
///
/// Targets the weakest topic seen so far (or `general` for a new learner) at
/// the difficulty [`select_next_difficulty`] picks.
pub fn generate_adaptive_quiz(
    bank: &QuestionBank,
    course_id: &str,
    history: &[Attempt],
) -> Result<Quiz, AssessmentError> {
    let topic = weak_topics(history)
        .into_iter()
        .next()
        .unwrap_or_else(|| "general".to_string());
    let difficulty = select_next_difficulty(history);

    tracing::info!(%topic, %difficulty, attempts = history.len(), "generating adaptive quiz");

    let questions = bank.generate(&GenerationRequest {
        topic,
        difficulty,
        question_count: ADAPTIVE_QUESTION_COUNT,
        question_types: vec![
            QuestionKind::MultipleChoice,
            QuestionKind::TrueFalse,
            QuestionKind::FillBlank,
        ],
        learning_objectives: vec![],
    })?;

    Ok(Quiz {
        id: format!("adaptive_{}", Uuid::new_v4().simple()),
        title: "Adaptive Assessment".into(),
        description: "Personalized quiz based on your learning progress".into(),
        course_id: Some(course_id.to_string()),
        lesson_id: Some("adaptive".into()),
        questions,
        passing_score: ADAPTIVE_PASSING_SCORE,
        time_limit_secs: Some(ADAPTIVE_TIME_LIMIT_SECS),
        max_attempts: Some(ADAPTIVE_MAX_ATTEMPTS),
    })
}
