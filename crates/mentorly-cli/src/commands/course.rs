//! The `mentorly course` command.

use std::path::PathBuf;

use anyhow::Result;

use mentorly_core::catalog::sample_courses;
use mentorly_core::course::Course;
use mentorly_core::history::AttemptHistory;

pub fn execute(course: Option<String>, history_path: Option<PathBuf>) -> Result<()> {
    let history = match &history_path {
        Some(path) => AttemptHistory::load_or_default(path)?,
        None => AttemptHistory::default(),
    };

    match course {
        Some(id) => {
            let mut course = super::load_course(&id)?;
            course.restore(&history);
            print_lessons(&course);
            super::print_course_status(&course);
        }
        None => {
            for mut course in sample_courses() {
                course.restore(&history);
                println!(
                    "{:<18} {:>3}%  {} ({} lessons)",
                    course.id,
                    course.progress(),
                    course.title,
                    course.lessons.len()
                );
            }
        }
    }

    Ok(())
}

fn print_lessons(course: &Course) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Lesson", "Type", "Minutes", "Status"]);

    for (i, lesson) in course.lessons.iter().enumerate() {
        let status = if lesson.completed {
            "done"
        } else if lesson.locked {
            "locked"
        } else {
            "open"
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{}\n{}", lesson.title, lesson.id)),
            Cell::new(lesson.kind),
            Cell::new(lesson.duration_mins.map(|m| m.to_string()).unwrap_or_default()),
            Cell::new(status),
        ]);
    }

    println!("{}: {}\n{table}", course.id, course.title);
}
