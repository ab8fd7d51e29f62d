//! The `mentorly next` command.

use std::path::PathBuf;

use anyhow::Result;

use mentorly_core::history::AttemptHistory;
use mentorly_core::select_next_difficulty;
use mentorly_core::statistics::{mean_score, topic_stats, weak_topics};

pub fn execute(history_path: PathBuf) -> Result<()> {
    let history = AttemptHistory::load_or_default(&history_path)?;
    let difficulty = select_next_difficulty(&history.attempts);

    match mean_score(&history.attempts) {
        Some(mean) => println!(
            "Next difficulty: {difficulty} (mean score {mean:.1} over {} attempts)",
            history.attempts.len()
        ),
        None => println!("Next difficulty: {difficulty} (no attempts yet)"),
    }

    let stats = topic_stats(&history.attempts);
    let weak = weak_topics(&history.attempts);
    if !weak.is_empty() {
        println!("\nTopics to review:");
        for topic in &weak {
            if let Some(t) = stats.iter().find(|s| &s.topic == topic) {
                println!("  {} ({} of {} missed)", t.topic, t.missed, t.seen);
            }
        }
    }

    let progress = history.progress();
    if !progress.is_empty() {
        println!("\nProgress:");
        for p in &progress {
            println!(
                "  {}: best {}%, latest {}% over {} attempt(s){}",
                p.quiz_id,
                p.best_score,
                p.latest_score,
                p.attempts,
                if p.passed { ", passed" } else { "" }
            );
        }
    }

    Ok(())
}
