//! The `mentorly validate` command.

use std::path::PathBuf;

use anyhow::Result;

use mentorly_core::parser::{
    load_quiz_directory, load_quiz_file, parse_catalog, validate_catalog, validate_quiz,
    ValidationWarning,
};

pub fn execute(quiz_path: Option<PathBuf>, catalog_path: Option<PathBuf>) -> Result<()> {
    if quiz_path.is_none() && catalog_path.is_none() {
        anyhow::bail!("nothing to validate: pass --quiz and/or --catalog");
    }

    let mut total_warnings = 0;

    if let Some(path) = quiz_path {
        let quizzes = if path.is_dir() {
            load_quiz_directory(&path)?
        } else {
            vec![load_quiz_file(&path)?]
        };

        for quiz in &quizzes {
            println!("Quiz: {} ({} questions)", quiz.title, quiz.questions.len());
            let warnings = validate_quiz(quiz);
            print_warnings(&warnings);
            total_warnings += warnings.len();
        }
    }

    if let Some(path) = catalog_path {
        let catalog = parse_catalog(&path)?;
        println!(
            "Catalog: {} ({} plans)",
            path.display(),
            catalog.plans.len()
        );
        let warnings = validate_catalog(&catalog);
        print_warnings(&warnings);
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        let prefix = w
            .item_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
}
