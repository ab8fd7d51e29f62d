//! The `mentorly evaluate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use mentorly_core::catalog::sample_course;
use mentorly_core::history::AttemptHistory;
use mentorly_core::model::{AnswerValue, Question, Quiz};
use mentorly_core::parser::parse_answers;
use mentorly_core::results::{Attempt, SubmittedAnswer};
use mentorly_core::AttemptSession;

pub fn execute(
    quiz: String,
    answers_path: PathBuf,
    history_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let quiz = super::load_quiz(&quiz)?;
    let answers = parse_answers(&answers_path)?;

    let mut history = match &history_path {
        Some(path) => AttemptHistory::load_or_default(path)?,
        None => AttemptHistory::default(),
    };

    let now = Utc::now();
    let mut session = AttemptSession::start(&quiz, history.attempt_count(&quiz.id), now)
        .with_context(|| format!("cannot start quiz {}", quiz.id))?;
    for (question_id, answer) in answers {
        session.record(&question_id, answer, now)?;
    }
    let attempt = session.submit(Utc::now());

    if let Some(path) = &history_path {
        history.push(attempt.clone());
        history.save_json(path)?;
        tracing::debug!("recorded attempt {} in {}", attempt.id, path.display());
    }

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&attempt)?),
        _ => {
            print_attempt(&quiz, &attempt);
            if history_path.is_some() {
                if let Some(mut course) = quiz.course_id.as_deref().and_then(sample_course) {
                    course.restore(&history);
                    println!("Course {}: {}% complete", course.id, course.progress());
                }
            }
        }
    }

    Ok(())
}

fn print_attempt(quiz: &Quiz, attempt: &Attempt) {
    use comfy_table::{Cell, Table};

    if quiz.questions.is_empty() {
        println!("Quiz {} has no questions.", quiz.id);
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Question", "Topic", "Result", "Your answer", "Expected", "Points"]);

        for (question, result) in quiz.questions.iter().zip(&attempt.results) {
            let submitted = match &result.submitted {
                SubmittedAnswer::Answered(value) => describe(question, value),
                SubmittedAnswer::Unanswered => "-".to_string(),
            };
            table.add_row(vec![
                Cell::new(&result.question_id),
                Cell::new(&result.topic),
                Cell::new(if result.correct { "correct" } else { "wrong" }),
                Cell::new(submitted),
                Cell::new(describe(question, &result.expected)),
                Cell::new(format!("{}/{}", result.points_earned, question.points)),
            ]);
        }

        println!("{}: {}\n{table}", quiz.id, quiz.title);

        for result in attempt.results.iter().filter(|r| !r.correct) {
            if !result.explanation.is_empty() {
                println!("  [{}] {}", result.question_id, result.explanation);
            }
        }
    }

    println!(
        "\nScore: {}% ({}, passing score {}%)",
        attempt.score,
        if attempt.passed { "PASSED" } else { "FAILED" },
        quiz.passing_score
    );
}

/// Show a choice answer by its option label.
fn describe(question: &Question, value: &AnswerValue) -> String {
    match value {
        AnswerValue::Index(i) => question
            .options
            .get(*i)
            .map(|label| format!("{i}: {label}"))
            .unwrap_or_else(|| i.to_string()),
        AnswerValue::Text(text) => text.clone(),
    }
}
