//! The `mentorly generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mentorly_core::catalog::default_question_bank;
use mentorly_core::generator::generate_adaptive_quiz;
use mentorly_core::history::AttemptHistory;

pub fn execute(history_path: PathBuf, course: String, output: Option<PathBuf>) -> Result<()> {
    let history = AttemptHistory::load_or_default(&history_path)?;
    let quiz = generate_adaptive_quiz(&default_question_bank(), &course, &history.attempts)?;
    let json = serde_json::to_string_pretty(&quiz).context("failed to serialize quiz")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write quiz to {}", path.display()))?;
            println!(
                "Generated {} ({} questions) -> {}",
                quiz.id,
                quiz.questions.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
