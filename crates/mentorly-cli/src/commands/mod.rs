pub mod access;
pub mod checkout;
pub mod course;
pub mod evaluate;
pub mod generate;
pub mod init;
pub mod lesson;
pub mod mint;
pub mod next;
pub mod plans;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use mentorly_core::catalog::{default_feature_matrix, default_plans, sample_course, sample_quiz};
use mentorly_core::course::Course;
use mentorly_core::model::Quiz;
use mentorly_core::parser::{load_quiz_file, parse_catalog};
use mentorly_core::EntitlementResolver;

/// Load a quiz from a TOML or JSON file, falling back to a bundled sample by id.
pub(crate) fn load_quiz(quiz: &str) -> Result<Quiz> {
    let path = Path::new(quiz);
    if path.exists() {
        return load_quiz_file(path);
    }
    sample_quiz(quiz).ok_or_else(|| anyhow::anyhow!("quiz not found: {quiz}"))
}

/// The resolver for a catalog file, or for the built-in plans.
pub(crate) fn load_resolver(catalog: Option<&PathBuf>) -> Result<EntitlementResolver> {
    match catalog {
        Some(path) => {
            let catalog = parse_catalog(path)?;
            Ok(EntitlementResolver::new(catalog.plans, catalog.features))
        }
        None => Ok(EntitlementResolver::new(
            default_plans(),
            default_feature_matrix(),
        )),
    }
}

/// A bundled course by id.
pub(crate) fn load_course(id: &str) -> Result<Course> {
    sample_course(id).ok_or_else(|| anyhow::anyhow!("course not found: {id}"))
}

pub(crate) fn print_course_status(course: &Course) {
    println!(
        "Progress: {}% ({} of {} lessons)",
        course.progress(),
        course.completed_count(),
        course.lessons.len()
    );
    match course.next_lesson() {
        Some(next) => println!("Next: {} ({}, {})", next.title, next.id, next.kind),
        None => println!(
            "Course complete. Claim \"{}\" with: mentorly mint --course {}",
            course.badge_name, course.id
        ),
    }
}
