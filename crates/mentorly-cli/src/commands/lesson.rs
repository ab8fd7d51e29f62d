//! The `mentorly lesson` command.

use std::path::PathBuf;

use anyhow::Result;

use mentorly_core::history::AttemptHistory;

pub fn execute(course: String, lesson: String, history_path: PathBuf) -> Result<()> {
    let mut history = AttemptHistory::load_or_default(&history_path)?;
    let mut course = super::load_course(&course)?;
    course.restore(&history);

    if course.complete_activity(&lesson)? {
        history.mark_lesson_complete(&course.id, &lesson);
        history.save_json(&history_path)?;
        tracing::debug!("recorded lesson {lesson} in {}", history_path.display());
        println!("Completed {lesson}");
    } else {
        println!("{lesson} is already complete");
    }

    super::print_course_status(&course);
    Ok(())
}
