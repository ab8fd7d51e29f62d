//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mentorly() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("mentorly").unwrap()
}

const DEMO_CONFIG: &str = r#"
[payments]
mode = "demo"

[badges]
mint_delay_ms = 0
network = "testnet"
"#;

fn write_demo_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("mentorly.toml");
    std::fs::write(&path, DEMO_CONFIG).unwrap();
    path
}

fn write_answers(dir: &Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("answers.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn help_output() {
    mentorly()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("AI career mentoring"))
        .stdout(predicate::str::contains("evaluate"))
        .stdout(predicate::str::contains("plans"));
}

#[test]
fn version_output() {
    mentorly()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mentorly"));
}

#[test]
fn validate_quiz_file() {
    mentorly()
        .arg("validate")
        .arg("--quiz")
        .arg("../../quizzes/ml-fundamentals.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 questions"))
        .stdout(predicate::str::contains("All files valid"));
}

#[test]
fn validate_quiz_directory() {
    mentorly()
        .arg("validate")
        .arg("--quiz")
        .arg("../../quizzes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Machine Learning Review"))
        .stdout(predicate::str::contains("DevOps Review"));
}

#[test]
fn validate_catalog_file() {
    mentorly()
        .arg("validate")
        .arg("--catalog")
        .arg("../../catalogs/plans.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 plans"))
        .stdout(predicate::str::contains("All files valid"));
}

#[test]
fn validate_nonexistent_file() {
    mentorly()
        .arg("validate")
        .arg("--quiz")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_requires_an_input() {
    mentorly()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to validate"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    mentorly()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mentorly.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.toml"));

    assert!(dir.path().join("mentorly.toml").exists());
    assert!(dir.path().join("quizzes/example.toml").exists());
    assert!(dir.path().join("quizzes/example-answers.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    mentorly().current_dir(dir.path()).arg("init").assert().success();

    mentorly()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}

#[test]
fn init_example_validates_and_scores() {
    let dir = TempDir::new().unwrap();
    mentorly().current_dir(dir.path()).arg("init").assert().success();

    mentorly()
        .current_dir(dir.path())
        .args(["validate", "--quiz", "quizzes/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions"));

    mentorly()
        .current_dir(dir.path())
        .args([
            "evaluate",
            "--quiz",
            "quizzes/example.toml",
            "--answers",
            "quizzes/example-answers.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 67% (FAILED"));
}

#[test]
fn evaluate_sample_quiz_all_correct() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(
        dir.path(),
        r#"{"q1": 0, "q2": 1, "q3": 1, "q4": 2, "q5": 1}"#,
    );

    mentorly()
        .args(["evaluate", "--quiz", "ml-quiz-1", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Machine Learning Fundamentals"))
        .stdout(predicate::str::contains("Score: 100% (PASSED"));
}

#[test]
fn evaluate_scores_true_false_and_code_completion() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(
        dir.path(),
        r#"{"q1": 0, "q2": 1, "q3": 0, "q4": 0, "q5": "cross"}"#,
    );

    mentorly()
        .args(["evaluate", "--quiz", "../../quizzes/ml-fundamentals.toml", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("0: train_test_split"))
        .stdout(predicate::str::contains("Score: 100% (PASSED"));
}

#[test]
fn evaluate_shows_explanations_for_misses() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), r#"{"q1": 0, "q2": 0}"#);

    mentorly()
        .args(["evaluate", "--quiz", "ml-quiz-1", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("[q2] Customer segmentation"))
        .stdout(predicate::str::contains("FAILED"));
}

#[test]
fn evaluate_json_output() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(
        dir.path(),
        r#"{"q1": 0, "q2": 1, "q3": 1, "q4": 2, "q5": 0}"#,
    );

    let output = mentorly()
        .args(["evaluate", "--quiz", "ml-quiz-1", "--format", "json", "--answers"])
        .arg(&answers)
        .output()
        .unwrap();
    assert!(output.status.success());

    let attempt: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // 6 of 9 points
    assert_eq!(attempt["score"], 67);
    assert_eq!(attempt["passed"], false);
    assert_eq!(attempt["quiz_id"], "ml-quiz-1");
}

#[test]
fn evaluate_unknown_quiz() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), "{}");

    mentorly()
        .args(["evaluate", "--quiz", "no-such-quiz", "--answers"])
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("quiz not found"));
}

#[test]
fn evaluate_rejects_unknown_question() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), r#"{"q99": 0}"#);

    mentorly()
        .args(["evaluate", "--quiz", "ml-quiz-1", "--answers"])
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown question: q99"));
}

#[test]
fn evaluate_records_history_and_enforces_attempt_limit() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), r#"{"q1": 0, "q2": 1, "q3": 1}"#);
    let history = dir.path().join("history.json");

    for _ in 0..3 {
        mentorly()
            .args(["evaluate", "--quiz", "devops-quiz-1", "--answers"])
            .arg(&answers)
            .arg("--history")
            .arg(&history)
            .assert()
            .success()
            .stdout(predicate::str::contains("Score: 100% (PASSED"));
    }

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&history).unwrap()).unwrap();
    assert_eq!(saved["attempts"].as_array().unwrap().len(), 3);

    mentorly()
        .args(["evaluate", "--quiz", "devops-quiz-1", "--answers"])
        .arg(&answers)
        .arg("--history")
        .arg(&history)
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum of 3 attempts reached"));
}

#[test]
fn next_without_history_starts_easy() {
    let dir = TempDir::new().unwrap();

    mentorly()
        .arg("next")
        .arg("--history")
        .arg(dir.path().join("missing.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Next difficulty: easy (no attempts yet)"));
}

#[test]
fn next_reports_weak_topics_and_progress() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), r#"{"q1": 1, "q2": 0, "q3": 0}"#);
    let history = dir.path().join("history.json");

    mentorly()
        .args(["evaluate", "--quiz", "devops-quiz-1", "--answers"])
        .arg(&answers)
        .arg("--history")
        .arg(&history)
        .assert()
        .success();

    mentorly()
        .arg("next")
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next difficulty: easy"))
        .stdout(predicate::str::contains("Topics to review:"))
        .stdout(predicate::str::contains("devops"))
        .stdout(predicate::str::contains("devops-quiz-1: best 0%"));
}

#[test]
fn generate_prints_quiz_json() {
    let dir = TempDir::new().unwrap();

    let output = mentorly()
        .arg("generate")
        .arg("--history")
        .arg(dir.path().join("missing.json"))
        .args(["--course", "ml-fundamentals"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let quiz: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(quiz["course_id"], "ml-fundamentals");
    assert!(!quiz["questions"].as_array().unwrap().is_empty());
}

#[test]
fn generate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("generated/quiz.json");

    mentorly()
        .arg("generate")
        .arg("--history")
        .arg(dir.path().join("missing.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    assert!(out.exists());
}

#[test]
fn generated_json_quiz_can_be_evaluated() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("generated.json");

    mentorly()
        .arg("generate")
        .arg("--history")
        .arg(dir.path().join("missing.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let answers = write_answers(dir.path(), "{}");
    mentorly()
        .arg("evaluate")
        .arg("--quiz")
        .arg(&out)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0% (FAILED"));

    mentorly()
        .arg("validate")
        .arg("--quiz")
        .arg(&out)
        .assert()
        .success();
}

#[test]
fn plans_monthly() {
    mentorly()
        .arg("plans")
        .args(["--currency", "USD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$29.00/month"))
        .stdout(predicate::str::contains("most popular"));
}

#[test]
fn plans_yearly_shows_savings() {
    mentorly()
        .arg("plans")
        .args(["--cycle", "yearly", "--currency", "USD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$290.00/year"))
        .stdout(predicate::str::contains("Save 17%"));
}

#[test]
fn plans_from_catalog_file() {
    mentorly()
        .arg("plans")
        .args(["--currency", "USD", "--catalog", "../../catalogs/plans.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$99.00/month"));
}

#[test]
fn plans_rejects_unknown_cycle() {
    mentorly()
        .arg("plans")
        .args(["--cycle", "weekly", "--currency", "USD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown billing cycle"));
}

#[test]
fn access_granted() {
    mentorly()
        .args(["access", "--plan", "professional", "--feature", "video_mentoring"])
        .assert()
        .success()
        .stdout(predicate::str::contains("professional: video_mentoring granted"));
}

#[test]
fn access_denied() {
    mentorly()
        .args(["access", "--plan", "basic", "--feature", "video_mentoring"])
        .assert()
        .success()
        .stdout(predicate::str::contains("basic: video_mentoring denied"));
}

#[test]
fn access_yearly_plan_has_its_own_entry() {
    mentorly()
        .args(["access", "--plan", "professional_yearly", "--feature", "video_mentoring"])
        .assert()
        .success()
        .stdout(predicate::str::contains("professional_yearly: video_mentoring granted"))
        .stdout(predicate::str::contains("Unknown plan").not());
}

#[test]
fn access_unknown_plan() {
    mentorly()
        .args(["access", "--plan", "platinum", "--feature", "basic_chat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown plan platinum"))
        .stdout(predicate::str::contains("denied"));
}

#[test]
fn checkout_in_demo_mode() {
    let dir = TempDir::new().unwrap();
    let config = write_demo_config(dir.path());

    mentorly()
        .args(["checkout", "--plan", "professional", "--email", "sam@example.com"])
        .arg("--config")
        .arg(&config)
        .env_remove("MENTORLY_STRIPE_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("via demo"))
        .stdout(predicate::str::contains("cs_demo_0001"));
}

#[test]
fn checkout_free_plan() {
    let dir = TempDir::new().unwrap();
    let config = write_demo_config(dir.path());

    mentorly()
        .args(["checkout", "--plan", "basic"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Basic is free"));
}

#[test]
fn checkout_live_without_key_is_not_configured() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("live.toml");
    std::fs::write(
        &config,
        "[payments]\nmode = \"live\"\npublishable_key = \"pk_test_your_key_here\"\n",
    )
    .unwrap();

    mentorly()
        .args(["checkout", "--plan", "professional"])
        .arg("--config")
        .arg(&config)
        .env_remove("MENTORLY_STRIPE_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

/// Walk the DevOps course to completion: two video lessons and a passing quiz.
fn complete_devops_course(dir: &Path) -> std::path::PathBuf {
    let history = dir.join("history.json");
    for lesson in ["devops-intro", "git-advanced"] {
        mentorly()
            .args(["lesson", "--course", "devops-mastery", "--lesson", lesson])
            .arg("--history")
            .arg(&history)
            .assert()
            .success();
    }

    let answers = write_answers(dir, r#"{"q1": 0, "q2": 1, "q3": 1}"#);
    mentorly()
        .args(["evaluate", "--quiz", "devops-quiz-1", "--answers"])
        .arg(&answers)
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Course devops-mastery: 100% complete"));
    history
}

#[test]
fn course_list_shows_progress() {
    mentorly()
        .arg("course")
        .assert()
        .success()
        .stdout(predicate::str::contains("ml-certification"))
        .stdout(predicate::str::contains("devops-mastery"))
        .stdout(predicate::str::contains("0%"));
}

#[test]
fn lesson_unlocks_next_and_reports_progress() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");

    mentorly()
        .args(["lesson", "--course", "devops-mastery", "--lesson", "devops-intro"])
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed devops-intro"))
        .stdout(predicate::str::contains("Progress: 33% (1 of 3 lessons)"))
        .stdout(predicate::str::contains("Next: Advanced Git Workflows"));

    mentorly()
        .args(["course", "--course", "devops-mastery"])
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("done"))
        .stdout(predicate::str::contains("locked"))
        .stdout(predicate::str::contains("Progress: 33%"));
}

#[test]
fn lesson_repeat_is_reported_not_recounted() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");

    for _ in 0..2 {
        mentorly()
            .args(["lesson", "--course", "devops-mastery", "--lesson", "devops-intro"])
            .arg("--history")
            .arg(&history)
            .assert()
            .success();
    }

    mentorly()
        .args(["course", "--course", "devops-mastery"])
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 of 3 lessons)"));
}

#[test]
fn lesson_locked_is_rejected() {
    let dir = TempDir::new().unwrap();

    mentorly()
        .args(["lesson", "--course", "devops-mastery", "--lesson", "git-advanced"])
        .arg("--history")
        .arg(dir.path().join("history.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));
}

#[test]
fn quiz_lesson_needs_evaluate() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");

    for lesson in ["devops-intro", "git-advanced"] {
        mentorly()
            .args(["lesson", "--course", "devops-mastery", "--lesson", lesson])
            .arg("--history")
            .arg(&history)
            .assert()
            .success();
    }

    mentorly()
        .args(["lesson", "--course", "devops-mastery", "--lesson", "devops-quiz-1"])
        .arg("--history")
        .arg(&history)
        .assert()
        .failure()
        .stderr(predicate::str::contains("mentorly evaluate"));
}

#[test]
fn unknown_course_is_an_error() {
    mentorly()
        .args(["course", "--course", "basket-weaving"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("course not found"));
}

#[test]
fn mint_badge_for_completed_course() {
    let dir = TempDir::new().unwrap();
    let config = write_demo_config(dir.path());
    let history = complete_devops_course(dir.path());

    mentorly()
        .args(["mint", "--course", "devops-mastery", "--recipient", "sam"])
        .arg("--history")
        .arg(&history)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Minted \"DevOps Engineer Certified\" for sam"))
        .stdout(predicate::str::contains("Transaction: ALGO_"))
        .stdout(predicate::str::contains("https://testnet.algoexplorer.io/tx/"));
}

#[test]
fn mint_custom_badge_name() {
    let dir = TempDir::new().unwrap();
    let config = write_demo_config(dir.path());
    let history = complete_devops_course(dir.path());

    mentorly()
        .args(["mint", "--course", "devops-mastery", "--recipient", "sam"])
        .args(["--badge", "Pipeline Pro"])
        .arg("--history")
        .arg(&history)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Minted \"Pipeline Pro\" for sam"));
}

#[test]
fn mint_requires_completed_course() {
    let dir = TempDir::new().unwrap();
    let config = write_demo_config(dir.path());
    let history = dir.path().join("history.json");

    mentorly()
        .args(["lesson", "--course", "devops-mastery", "--lesson", "devops-intro"])
        .arg("--history")
        .arg(&history)
        .assert()
        .success();

    mentorly()
        .args(["mint", "--course", "devops-mastery", "--recipient", "sam"])
        .arg("--history")
        .arg(&history)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("33% complete"));
}

#[test]
fn failed_quiz_does_not_complete_course() {
    let dir = TempDir::new().unwrap();
    let config = write_demo_config(dir.path());
    let history = dir.path().join("history.json");

    for lesson in ["devops-intro", "git-advanced"] {
        mentorly()
            .args(["lesson", "--course", "devops-mastery", "--lesson", lesson])
            .arg("--history")
            .arg(&history)
            .assert()
            .success();
    }
    let answers = write_answers(dir.path(), r#"{"q1": 1, "q2": 0, "q3": 1}"#);
    mentorly()
        .args(["evaluate", "--quiz", "devops-quiz-1", "--answers"])
        .arg(&answers)
        .arg("--history")
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Course devops-mastery: 67% complete"));

    mentorly()
        .args(["mint", "--course", "devops-mastery", "--recipient", "sam"])
        .arg("--history")
        .arg(&history)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure();
}
