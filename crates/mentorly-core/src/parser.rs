//! TOML quiz and plan catalog loaders.
//!
//! Loads quizzes and plan catalogs from TOML files and directories, rejects
//! structurally broken data, and reports softer issues as warnings.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    default_topic, AnswerValue, BillingInterval, Difficulty, FeatureMatrix, Question,
    QuestionKind, Quiz, SubscriptionPlan,
};

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    course_id: Option<String>,
    #[serde(default)]
    lesson_id: Option<String>,
    #[serde(default = "default_passing_score")]
    passing_score: u32,
    #[serde(default)]
    time_limit_secs: Option<u64>,
    #[serde(default)]
    max_attempts: Option<u32>,
}

fn default_passing_score() -> u32 {
    70
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    prompt: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: AnswerValue,
    #[serde(default)]
    explanation: String,
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(default = "default_topic")]
    topic: String,
    #[serde(default)]
    points: Option<u32>,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// Parse a single TOML file into a `Quiz`.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `Quiz` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let kind: QuestionKind = q
                .kind
                .parse()
                .with_context(|| format!("question {}", q.id))?;
            let difficulty: Difficulty = q
                .difficulty
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;

            Ok(Question {
                points: q.points.unwrap_or_else(|| difficulty.default_points()),
                id: q.id,
                kind,
                prompt: q.prompt,
                options: q.options,
                correct_answer: q.correct_answer,
                explanation: q.explanation,
                difficulty,
                topic: q.topic,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let quiz = Quiz {
        id: parsed.quiz.id,
        title: parsed.quiz.title,
        description: parsed.quiz.description,
        course_id: parsed.quiz.course_id,
        lesson_id: parsed.quiz.lesson_id,
        questions,
        passing_score: parsed.quiz.passing_score,
        time_limit_secs: parsed.quiz.time_limit_secs,
        max_attempts: parsed.quiz.max_attempts,
    };

    quiz.validate()
        .with_context(|| format!("invalid quiz in {}", source_path.display()))?;

    Ok(quiz)
}

/// Parse a quiz stored as JSON, the format `mentorly generate` writes.
pub fn parse_quiz_json(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;
    let quiz: Quiz = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse quiz JSON: {}", path.display()))?;

    quiz.validate()
        .with_context(|| format!("invalid quiz in {}", path.display()))?;

    Ok(quiz)
}

/// Load a quiz file, picking JSON or TOML by extension.
pub fn load_quiz_file(path: &Path) -> Result<Quiz> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => parse_quiz_json(path),
        _ => parse_quiz(path),
    }
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// Load a learner's answers from JSON, e.g. `{"q1": 0, "q5": "cross"}`.
pub fn parse_answers(path: &Path) -> Result<BTreeMap<String, AnswerValue>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
}

/// A warning from quiz or catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question or plan id (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz for issues that do not prevent scoring.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.questions.is_empty() {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "quiz has no questions; every attempt will score 0".into(),
        });
    }

    for question in &quiz.questions {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                item_id: Some(question.id.clone()),
                message: "prompt is empty".into(),
            });
        }
        if question.explanation.trim().is_empty() {
            warnings.push(ValidationWarning {
                item_id: Some(question.id.clone()),
                message: "no explanation provided".into(),
            });
        }
        if question.kind == QuestionKind::FillBlank && !question.options.is_empty() {
            warnings.push(ValidationWarning {
                item_id: Some(question.id.clone()),
                message: "fill-blank question has options; they will be ignored".into(),
            });
        }
    }

    if quiz.max_attempts == Some(0) {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "max_attempts is 0; the quiz can never be started".into(),
        });
    }

    warnings
}

/// Subscription plans plus the feature matrix that gates them.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanCatalog {
    #[serde(default)]
    pub plans: Vec<SubscriptionPlan>,
    #[serde(default)]
    pub features: FeatureMatrix,
}

/// Parse a plan catalog TOML file.
pub fn parse_catalog(path: &Path) -> Result<PlanCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
    parse_catalog_str(&content, path)
}

/// Parse a plan catalog from a TOML string.
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<PlanCatalog> {
    let catalog: PlanCatalog = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    for plan in &catalog.plans {
        anyhow::ensure!(
            plan.price.is_finite() && plan.price >= 0.0,
            "plan {} has an invalid price: {}",
            plan.id,
            plan.price
        );
    }

    Ok(catalog)
}

fn monthly_price(plan: &SubscriptionPlan) -> f64 {
    match plan.interval {
        BillingInterval::Month => plan.price,
        BillingInterval::Year => plan.price / 12.0,
    }
}

/// Validate a plan catalog.
///
/// Tiers in the feature matrix are expected (not required) to be additive:
/// ordered by monthly price, each tier should unlock everything the cheaper
/// one does.
pub fn validate_catalog(catalog: &PlanCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for plan in &catalog.plans {
        if !seen_ids.insert(&plan.id) {
            warnings.push(ValidationWarning {
                item_id: Some(plan.id.clone()),
                message: format!("duplicate plan ID: {}", plan.id),
            });
        }
    }

    // Access is looked up by exact plan id, so every billing variant needs
    // its own entry.
    for plan in &catalog.plans {
        if !catalog.features.contains_plan(&plan.id) {
            warnings.push(ValidationWarning {
                item_id: Some(plan.id.clone()),
                message: "plan has no feature matrix entry and unlocks nothing".into(),
            });
        }
    }

    let mut tiers: Vec<(&str, f64)> = Vec::new();
    for plan_id in catalog.features.plan_ids() {
        match catalog.plans.iter().find(|p| p.id == plan_id) {
            Some(plan) => tiers.push((plan_id, monthly_price(plan))),
            None => warnings.push(ValidationWarning {
                item_id: Some(plan_id.to_string()),
                message: "feature matrix entry has no matching plan".into(),
            }),
        }
    }

    tiers.sort_by(|a, b| a.1.total_cmp(&b.1));
    for pair in tiers.windows(2) {
        let (lower, upper) = (pair[0].0, pair[1].0);
        let (Some(lower_tokens), Some(upper_tokens)) =
            (catalog.features.tokens(lower), catalog.features.tokens(upper))
        else {
            continue;
        };
        let missing: Vec<&str> = lower_tokens
            .difference(upper_tokens)
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            warnings.push(ValidationWarning {
                item_id: Some(upper.to_string()),
                message: format!(
                    "tier does not include everything in {lower}: {}",
                    missing.join(", ")
                ),
            });
        }
    }

    warnings
}
