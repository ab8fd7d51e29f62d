//! The `mentorly init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("mentorly.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("quizzes")?;
    write_if_missing(Path::new("quizzes/example.toml"), EXAMPLE_QUIZ)?;
    write_if_missing(Path::new("quizzes/example-answers.json"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Edit mentorly.toml and switch services to live mode as keys become available");
    println!("  2. Run: mentorly validate --quiz quizzes/example.toml");
    println!("  3. Run: mentorly evaluate --quiz quizzes/example.toml --answers quizzes/example-answers.json --history history.json");
    println!("  4. Run: mentorly next --history history.json");
    println!("  5. Run: mentorly course --course devops-mastery --history history.json");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mentorly configuration
#
# Every service starts in demo mode. Set mode = "live" and provide a key to
# use the real API; MENTORLY_STRIPE_KEY, MENTORLY_TAVUS_KEY and
# MENTORLY_ELEVENLABS_KEY override the keys below and imply live mode.

default_currency = "USD"
timeout_secs = 30

[payments]
mode = "demo"
publishable_key = "${STRIPE_PUBLISHABLE_KEY}"
backend_url = "http://localhost:3000"

[video]
mode = "demo"
api_key = "${TAVUS_API_KEY}"

[speech]
mode = "demo"
api_key = "${ELEVENLABS_API_KEY}"

[badges]
mint_delay_ms = 3000
network = "testnet"
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
id = "example"
title = "Example Quiz"
description = "A short quiz to get started"
passing_score = 70
time_limit_secs = 600
max_attempts = 3

[[questions]]
id = "q1"
type = "multiple-choice"
prompt = "What is the main goal of supervised learning?"
options = [
    "To learn from labeled training data to make predictions",
    "To find hidden patterns in unlabeled data",
    "To maximize rewards through trial and error",
    "To reduce the dimensionality of data",
]
correct_answer = 0
difficulty = "easy"
topic = "machine learning"
explanation = "Supervised learning uses labeled training data to learn a mapping to predictions."

[[questions]]
id = "q2"
type = "true-false"
prompt = "True or False: Deep learning always outperforms traditional machine learning algorithms."
options = ["True", "False"]
correct_answer = 1
difficulty = "medium"
topic = "machine learning"
explanation = "Traditional ML can be better for smaller datasets or simpler problems."

[[questions]]
id = "q3"
type = "fill-blank"
prompt = "The technique of splitting data into multiple folds for training and testing is called _____ validation."
correct_answer = "cross"
difficulty = "hard"
topic = "model evaluation"
explanation = "Cross-validation trains and tests on different folds to estimate generalization."
"#;

const EXAMPLE_ANSWERS: &str = r#"{
  "q1": 0,
  "q2": 0,
  "q3": "Cross"
}
"#;
