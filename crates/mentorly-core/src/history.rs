//! A learner's attempt history with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::results::Attempt;
use crate::statistics::{quiz_progress, QuizProgress};

/// Every submitted attempt for one learner, oldest first, plus the non-quiz
/// lessons they marked done.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttemptHistory {
    #[serde(default)]
    pub attempts: Vec<Attempt>,
    /// Course id to lesson ids, in completion order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub completed_lessons: BTreeMap<String, Vec<String>>,
}

impl AttemptHistory {
    /// Save the history as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize history")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write history to {}", path.display()))?;
        Ok(())
    }

    /// Load a history from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read history from {}", path.display()))?;
        let history: AttemptHistory =
            serde_json::from_str(&content).context("failed to parse history JSON")?;
        Ok(history)
    }

    /// Load a history, or start an empty one if the file does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_json(path)
        } else {
            tracing::debug!("no history at {}, starting fresh", path.display());
            Ok(Self::default())
        }
    }

    pub fn push(&mut self, attempt: Attempt) {
        self.attempts.push(attempt);
    }

    /// Attempts made on one quiz, oldest first.
    pub fn for_quiz<'a>(&'a self, quiz_id: &'a str) -> impl Iterator<Item = &'a Attempt> + 'a {
        self.attempts.iter().filter(move |a| a.quiz_id == quiz_id)
    }

    /// Number of attempts already made on a quiz.
    pub fn attempt_count(&self, quiz_id: &str) -> usize {
        self.for_quiz(quiz_id).count()
    }

    pub fn progress(&self) -> Vec<QuizProgress> {
        quiz_progress(&self.attempts)
    }

    /// Record a non-quiz lesson as done. Returns `false` if it already was.
    pub fn mark_lesson_complete(&mut self, course_id: &str, lesson_id: &str) -> bool {
        let done = self.completed_lessons.entry(course_id.to_string()).or_default();
        if done.iter().any(|id| id == lesson_id) {
            return false;
        }
        done.push(lesson_id.to_string());
        true
    }

    pub fn completed_lessons(&self, course_id: &str) -> &[String] {
        self.completed_lessons
            .get(course_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty() && self.completed_lessons.is_empty()
    }
}
