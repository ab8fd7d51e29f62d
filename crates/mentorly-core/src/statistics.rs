//! Aggregate statistics over attempt history.
//!
//! Feeds adaptive quiz generation: the mean score picks the next difficulty,
//! per-topic miss ratios pick the next topic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::results::Attempt;

/// Mean score across attempts, or `None` when there are none.
pub fn mean_score(attempts: &[Attempt]) -> Option<f64> {
    if attempts.is_empty() {
        return None;
    }
    let sum: u64 = attempts.iter().map(|a| u64::from(a.score)).sum();
    Some(sum as f64 / attempts.len() as f64)
}

/// How a learner has fared on one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicStats {
    pub topic: String,
    /// Questions on this topic seen across all attempts.
    pub seen: u32,
    /// Of those, answered wrong or left blank.
    pub missed: u32,
}

impl TopicStats {
    pub fn miss_ratio(&self) -> f64 {
        if self.seen == 0 {
            0.0
        } else {
            self.missed as f64 / self.seen as f64
        }
    }
}

/// Per-topic tallies across every question result in the history.
pub fn topic_stats(attempts: &[Attempt]) -> Vec<TopicStats> {
    let mut by_topic: HashMap<&str, (u32, u32)> = HashMap::new();
    for attempt in attempts {
        for result in &attempt.results {
            let entry = by_topic.entry(result.topic.as_str()).or_default();
            entry.0 += 1;
            if !result.correct {
                entry.1 += 1;
            }
        }
    }

    let mut stats: Vec<TopicStats> = by_topic
        .into_iter()
        .map(|(topic, (seen, missed))| TopicStats {
            topic: topic.to_string(),
            seen,
            missed,
        })
        .collect();
    stats.sort_by(|a, b| a.topic.cmp(&b.topic));
    stats
}

/// Topics the learner struggles with, worst first.
///
/// Only topics with at least one miss are listed. Ties are broken by topic
/// name so the order is stable.
pub fn weak_topics(attempts: &[Attempt]) -> Vec<String> {
    let mut stats: Vec<TopicStats> = topic_stats(attempts)
        .into_iter()
        .filter(|s| s.missed > 0)
        .collect();

    stats.sort_by(|a, b| {
        b.miss_ratio()
            .total_cmp(&a.miss_ratio())
            .then_with(|| a.topic.cmp(&b.topic))
    });

    stats.into_iter().map(|s| s.topic).collect()
}

/// Summary of a learner's history on one quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizProgress {
    pub quiz_id: String,
    pub attempts: usize,
    pub best_score: u32,
    pub latest_score: u32,
    pub passed: bool,
}

/// Progress per quiz, ordered by quiz id.
pub fn quiz_progress(attempts: &[Attempt]) -> Vec<QuizProgress> {
    let mut grouped: HashMap<&str, Vec<&Attempt>> = HashMap::new();
    for attempt in attempts {
        grouped.entry(attempt.quiz_id.as_str()).or_default().push(attempt);
    }

    let mut progress: Vec<QuizProgress> = grouped
        .into_iter()
        .filter_map(|(quiz_id, group)| {
            let latest = group.iter().max_by_key(|a| a.submitted_at)?;
            Some(QuizProgress {
                quiz_id: quiz_id.to_string(),
                attempts: group.len(),
                best_score: group.iter().map(|a| a.score).max().unwrap_or(0),
                latest_score: latest.score,
                passed: group.iter().any(|a| a.passed),
            })
        })
        .collect();
    progress.sort_by(|a, b| a.quiz_id.cmp(&b.quiz_id));
    progress
}
