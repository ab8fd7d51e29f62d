//! Error types for quiz assessment and entitlement resolution.
//!
//! Structural problems with quiz data are rejected when a quiz is loaded, so
//! scoring itself never fails.

use thiserror::Error;

/// Errors raised while loading quizzes or running an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// A question declared a type outside the supported set.
    #[error("invalid question type: {0}")]
    InvalidQuestionType(String),

    /// A choice question has no options to choose from.
    #[error("question {0} requires options")]
    MissingOptions(String),

    /// The answer key does not fit the question kind or its options.
    #[error("question {question_id}: invalid correct answer ({reason})")]
    InvalidCorrectAnswer { question_id: String, reason: String },

    /// A question was given a zero point weight.
    #[error("question {0}: points must be between 1 and 1000")]
    InvalidPoints(String),

    /// The passing threshold is not a percentage.
    #[error("passing score must be between 0 and 100, got {0}")]
    InvalidPassingScore(u32),

    /// The time limit is zero or longer than a week.
    #[error("time limit must be between 1 and 604800 seconds, got {0}")]
    InvalidTimeLimit(u64),

    /// Two questions in one quiz share an id.
    #[error("duplicate question id: {0}")]
    DuplicateQuestionId(String),

    /// An answer was recorded for a question the quiz does not contain.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// The attempt's time limit has elapsed.
    #[error("time limit of {limit_secs}s has expired")]
    TimeExpired { limit_secs: u64 },

    /// The learner has used every allowed attempt for this quiz.
    #[error("maximum of {max_attempts} attempts reached")]
    AttemptsExhausted { max_attempts: u32 },

    /// The question bank has nothing for the requested kind.
    #[error("no questions available for {0}")]
    NoQuestionsAvailable(String),
}

/// Errors raised when moving through a course.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseError {
    #[error("course {course_id} has no lesson {lesson_id}")]
    UnknownLesson { course_id: String, lesson_id: String },

    /// The previous lesson has not been completed yet.
    #[error("lesson {0} is locked; complete the previous lesson first")]
    LessonLocked(String),

    /// Quiz lessons complete through a passing attempt only.
    #[error("lesson {0} is a quiz; pass it with `mentorly evaluate`")]
    QuizLesson(String),
}

/// Errors raised by price formatting and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntitlementError {
    /// The currency code is not a three-letter ISO 4217 code.
    #[error("invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// The amount is NaN or infinite.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A display price could not be read back into an amount.
    #[error("cannot parse price: {0:?}")]
    UnparseablePrice(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            AssessmentError::InvalidQuestionType("essay".into()).to_string(),
            "invalid question type: essay"
        );
        assert_eq!(
            AssessmentError::TimeExpired { limit_secs: 600 }.to_string(),
            "time limit of 600s has expired"
        );
        assert_eq!(
            EntitlementError::InvalidCurrency("US".into()).to_string(),
            "invalid currency code: \"US\""
        );
    }
}
