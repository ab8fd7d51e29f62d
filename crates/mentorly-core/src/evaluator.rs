//! Quiz scoring, adaptive difficulty selection, and the attempt lifecycle.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AssessmentError;
use crate::model::{AnswerValue, Difficulty, Quiz};
use crate::results::{Attempt, Evaluation, QuestionResult, SubmittedAnswer};
use crate::statistics::mean_score;

/// Mean score at or above which the next quiz is hard.
pub const HARD_THRESHOLD: f64 = 80.0;
/// Mean score at or above which the next quiz is medium.
pub const MEDIUM_THRESHOLD: f64 = 60.0;

/// Score a set of answers against a quiz.
///
/// Questions missing from `answers` count as unanswered and earn nothing.
/// A quiz without questions scores 0 and does not pass.
pub fn evaluate(quiz: &Quiz, answers: &BTreeMap<String, AnswerValue>) -> Evaluation {
    let results: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .map(|question| {
            let submitted = match answers.get(&question.id) {
                Some(value) => SubmittedAnswer::Answered(value.clone()),
                None => SubmittedAnswer::Unanswered,
            };
            let correct = match &submitted {
                SubmittedAnswer::Answered(value) => question.is_correct(value),
                SubmittedAnswer::Unanswered => false,
            };

            QuestionResult {
                question_id: question.id.clone(),
                topic: question.topic.clone(),
                correct,
                submitted,
                expected: question.correct_answer.clone(),
                explanation: question.explanation.clone(),
                points_earned: if correct { question.points } else { 0 },
            }
        })
        .collect();

    let total_points = quiz.total_points();
    let earned_points: u64 = results.iter().map(|r| u64::from(r.points_earned)).sum();

    if total_points == 0 {
        tracing::debug!(quiz = %quiz.id, "quiz has no scorable questions");
        return Evaluation {
            score: 0,
            passed: false,
            earned_points: 0,
            total_points: 0,
            results,
        };
    }

    let score = percent_round_half_up(earned_points, total_points);
    let passed = score >= quiz.passing_score;

    tracing::debug!(
        quiz = %quiz.id,
        earned_points,
        total_points,
        score,
        passed,
        "quiz evaluated"
    );

    Evaluation {
        score,
        passed,
        earned_points,
        total_points,
        results,
    }
}

/// `round(earned / total * 100)` with halves rounded up, in integer math.
fn percent_round_half_up(earned: u64, total: u64) -> u32 {
    let earned = u128::from(earned.min(total));
    let total = u128::from(total);
    ((earned * 200 + total) / (total * 2)) as u32
}

/// Pick the difficulty of the next adaptive quiz from past attempts.
pub fn select_next_difficulty(past_attempts: &[Attempt]) -> Difficulty {
    match mean_score(past_attempts) {
        None => Difficulty::Easy,
        Some(mean) => difficulty_for_mean(mean),
    }
}

/// Map a mean score to a difficulty tier. Boundaries belong to the higher tier.
pub fn difficulty_for_mean(mean: f64) -> Difficulty {
    if mean >= HARD_THRESHOLD {
        Difficulty::Hard
    } else if mean >= MEDIUM_THRESHOLD {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    }
}

/// An attempt in progress.
///
/// Answers may be recorded until the quiz's time limit elapses. Submitting
/// consumes the session, so a finalized [`Attempt`] can never be changed.
#[derive(Debug)]
pub struct AttemptSession<'q> {
    quiz: &'q Quiz,
    id: Uuid,
    answers: BTreeMap<String, AnswerValue>,
    started_at: DateTime<Utc>,
}

impl<'q> AttemptSession<'q> {
    /// Start a new attempt, given how many attempts the learner already made.
    pub fn start(
        quiz: &'q Quiz,
        prior_attempts: usize,
        now: DateTime<Utc>,
    ) -> Result<Self, AssessmentError> {
        if let Some(max_attempts) = quiz.max_attempts {
            if prior_attempts >= max_attempts as usize {
                return Err(AssessmentError::AttemptsExhausted { max_attempts });
            }
        }

        Ok(Self {
            quiz,
            id: Uuid::new_v4(),
            answers: BTreeMap::new(),
            started_at: now,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quiz(&self) -> &Quiz {
        self.quiz
    }

    pub fn answers(&self) -> &BTreeMap<String, AnswerValue> {
        &self.answers
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the time limit runs out, if the quiz has one.
    ///
    /// A limit too large to represent as a timestamp behaves as no limit.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.quiz.time_limit_secs?).ok()?;
        let limit = chrono::TimeDelta::try_seconds(secs)?;
        self.started_at.checked_add_signed(limit)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.deadline().is_some_and(|deadline| now >= deadline)
    }

    /// Seconds left before auto-submit; `None` for untimed quizzes.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> Option<u64> {
        self.deadline()
            .map(|deadline| (deadline - now).num_seconds().max(0) as u64)
    }

    /// Record (or overwrite) the answer to one question.
    pub fn record(
        &mut self,
        question_id: &str,
        answer: AnswerValue,
        now: DateTime<Utc>,
    ) -> Result<(), AssessmentError> {
        if self.is_expired(now) {
            return Err(AssessmentError::TimeExpired {
                limit_secs: self.quiz.time_limit_secs.unwrap_or_default(),
            });
        }
        if self.quiz.question(question_id).is_none() {
            return Err(AssessmentError::UnknownQuestion(question_id.to_string()));
        }

        self.answers.insert(question_id.to_string(), answer);
        Ok(())
    }

    /// Withdraw an answer, leaving the question unanswered.
    pub fn clear(&mut self, question_id: &str) -> Option<AnswerValue> {
        self.answers.remove(question_id)
    }

    /// Finalize the attempt with whatever answers were recorded.
    pub fn submit(self, now: DateTime<Utc>) -> Attempt {
        let timed_out = self.is_expired(now);
        let elapsed = (now - self.started_at).num_seconds().max(0) as u64;
        let time_spent_secs = match self.quiz.time_limit_secs {
            Some(limit) if timed_out => elapsed.min(limit),
            _ => elapsed,
        };

        let evaluation = evaluate(self.quiz, &self.answers);

        if timed_out {
            tracing::info!(quiz = %self.quiz.id, attempt = %self.id, "attempt auto-submitted at time limit");
        }

        Attempt {
            id: self.id,
            quiz_id: self.quiz.id.clone(),
            answers: self.answers,
            score: evaluation.score,
            passed: evaluation.passed,
            results: evaluation.results,
            started_at: self.started_at,
            submitted_at: now,
            time_spent_secs,
            timed_out,
        }
    }
}
