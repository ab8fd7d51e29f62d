//! Courses, lesson unlocking and completion progress.
//!
//! Lessons are taken in order: the first is open, and completing a lesson
//! unlocks the one after it. A quiz lesson shares its id with the quiz and is
//! completed by a passing attempt; other lessons are marked done by the
//! learner. Course state is rebuilt from an [`AttemptHistory`] rather than
//! stored on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CourseError;
use crate::history::AttemptHistory;
use crate::results::Attempt;

/// What a lesson asks the learner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonKind {
    Video,
    Quiz,
    Project,
    Reading,
    Colab,
    External,
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LessonKind::Video => "video",
            LessonKind::Quiz => "quiz",
            LessonKind::Project => "project",
            LessonKind::Reading => "reading",
            LessonKind::Colab => "colab",
            LessonKind::External => "external",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: LessonKind,
    #[serde(default)]
    pub duration_mins: Option<u32>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Lesson {
    pub fn new(id: &str, title: &str, kind: LessonKind, duration_mins: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            duration_mins: Some(duration_mins),
            completed: false,
            locked: true,
        }
    }
}

/// An ordered sequence of lessons that earns a badge when finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub badge_name: String,
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// A fresh course: only the first lesson is open, nothing is completed.
    pub fn new(id: &str, title: &str, badge_name: &str, lessons: Vec<Lesson>) -> Self {
        let mut course = Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            badge_name: badge_name.into(),
            lessons,
        };
        course.reset();
        course
    }

    /// Lock everything but the first lesson and clear completions.
    pub fn reset(&mut self) {
        for (i, lesson) in self.lessons.iter_mut().enumerate() {
            lesson.completed = false;
            lesson.locked = i > 0;
        }
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }

    /// Mark a lesson complete and unlock the next one.
    ///
    /// Returns `false` when the lesson was already complete.
    pub fn complete_lesson(&mut self, lesson_id: &str) -> Result<bool, CourseError> {
        let index = self
            .lessons
            .iter()
            .position(|l| l.id == lesson_id)
            .ok_or_else(|| CourseError::UnknownLesson {
                course_id: self.id.clone(),
                lesson_id: lesson_id.to_string(),
            })?;

        let lesson = &mut self.lessons[index];
        if lesson.locked {
            return Err(CourseError::LessonLocked(lesson_id.to_string()));
        }
        if lesson.completed {
            return Ok(false);
        }
        self.finish(index);

        tracing::debug!(course = %self.id, lesson = lesson_id, progress = self.progress(), "lesson completed");
        Ok(true)
    }

    /// Complete a non-quiz lesson on the learner's say-so.
    pub fn complete_activity(&mut self, lesson_id: &str) -> Result<bool, CourseError> {
        if let Some(lesson) = self.lesson(lesson_id) {
            if lesson.kind == LessonKind::Quiz {
                return Err(CourseError::QuizLesson(lesson_id.to_string()));
            }
        }
        self.complete_lesson(lesson_id)
    }

    /// Apply a quiz attempt: a pass completes the matching quiz lesson.
    ///
    /// Attempts on quizzes outside this course, and failed attempts, change
    /// nothing.
    pub fn record_attempt(&mut self, attempt: &Attempt) -> Result<bool, CourseError> {
        let is_quiz_lesson = self
            .lesson(&attempt.quiz_id)
            .is_some_and(|l| l.kind == LessonKind::Quiz);
        if !is_quiz_lesson || !attempt.passed {
            return Ok(false);
        }
        self.complete_lesson(&attempt.quiz_id)
    }

    /// Rebuild completion state from a learner's history.
    ///
    /// Lessons are walked in order; each open lesson that the history marks
    /// done (or whose quiz was passed) completes and opens the next.
    pub fn restore(&mut self, history: &AttemptHistory) {
        self.reset();
        let marked = history.completed_lessons(&self.id);

        for i in 0..self.lessons.len() {
            let lesson = &self.lessons[i];
            if lesson.locked {
                break;
            }
            let done = match lesson.kind {
                LessonKind::Quiz => history.for_quiz(&lesson.id).any(|a| a.passed),
                _ => marked.iter().any(|id| id == &lesson.id),
            };
            if !done {
                break;
            }
            self.finish(i);
        }
    }

    fn finish(&mut self, index: usize) {
        self.lessons[index].completed = true;
        if let Some(next) = self.lessons.get_mut(index + 1) {
            next.locked = false;
        }
    }

    pub fn completed_count(&self) -> usize {
        self.lessons.iter().filter(|l| l.completed).count()
    }

    /// Percent of lessons completed, rounded half up. An empty course is at 0.
    pub fn progress(&self) -> u32 {
        let total = self.lessons.len();
        if total == 0 {
            return 0;
        }
        ((self.completed_count() * 200 + total) / (total * 2)) as u32
    }

    pub fn is_complete(&self) -> bool {
        !self.lessons.is_empty() && self.lessons.iter().all(|l| l.completed)
    }

    /// The first open lesson not yet completed.
    pub fn next_lesson(&self) -> Option<&Lesson> {
        self.lessons.iter().find(|l| !l.locked && !l.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn course() -> Course {
        Course::new(
            "ml",
            "Machine Learning",
            "ML Certified Professional",
            vec![
                Lesson::new("intro", "Introduction", LessonKind::Video, 15),
                Lesson::new("types", "Types of ML", LessonKind::Video, 20),
                Lesson::new("ml-quiz-1", "Knowledge Check", LessonKind::Quiz, 10),
            ],
        )
    }

    fn attempt(quiz_id: &str, passed: bool) -> Attempt {
        Attempt {
            id: Uuid::new_v4(),
            quiz_id: quiz_id.into(),
            answers: BTreeMap::new(),
            score: if passed { 90 } else { 40 },
            passed,
            results: vec![],
            started_at: Utc::now(),
            submitted_at: Utc::now(),
            time_spent_secs: 60,
            timed_out: false,
        }
    }

    #[test]
    fn new_course_opens_only_first_lesson() {
        let c = course();
        assert!(!c.lessons[0].locked);
        assert!(c.lessons[1].locked);
        assert!(c.lessons[2].locked);
        assert_eq!(c.progress(), 0);
        assert_eq!(c.next_lesson().map(|l| l.id.as_str()), Some("intro"));
    }

    #[test]
    fn completing_unlocks_next() {
        let mut c = course();
        assert_eq!(c.complete_lesson("intro"), Ok(true));
        assert!(!c.lessons[1].locked);
        assert!(c.lessons[2].locked);
        assert_eq!(c.progress(), 33);

        assert_eq!(c.complete_lesson("intro"), Ok(false));
        assert_eq!(c.completed_count(), 1);
    }

    #[test]
    fn locked_and_unknown_lessons_are_rejected() {
        let mut c = course();
        assert_eq!(
            c.complete_lesson("types"),
            Err(CourseError::LessonLocked("types".into()))
        );
        assert!(matches!(
            c.complete_lesson("nope"),
            Err(CourseError::UnknownLesson { .. })
        ));
    }

    #[test]
    fn quiz_lessons_need_a_passing_attempt() {
        let mut c = course();
        c.complete_activity("intro").unwrap();
        c.complete_activity("types").unwrap();
        assert_eq!(
            c.complete_activity("ml-quiz-1"),
            Err(CourseError::QuizLesson("ml-quiz-1".into()))
        );

        assert_eq!(c.record_attempt(&attempt("ml-quiz-1", false)), Ok(false));
        assert_eq!(c.progress(), 67);
        assert_eq!(c.record_attempt(&attempt("other-quiz", true)), Ok(false));

        assert_eq!(c.record_attempt(&attempt("ml-quiz-1", true)), Ok(true));
        assert_eq!(c.progress(), 100);
        assert!(c.is_complete());
        assert!(c.next_lesson().is_none());
    }

    #[test]
    fn restore_walks_lessons_in_order() {
        let mut history = AttemptHistory::default();
        history.mark_lesson_complete("ml", "intro");
        history.push(attempt("ml-quiz-1", true));

        let mut c = course();
        c.restore(&history);
        // "types" is not done, so the passed quiz stays locked
        assert_eq!(c.completed_count(), 1);
        assert!(c.lessons[2].locked);

        history.mark_lesson_complete("ml", "types");
        c.restore(&history);
        assert!(c.is_complete());
        assert_eq!(c.progress(), 100);
    }

    #[test]
    fn restore_ignores_other_courses() {
        let mut history = AttemptHistory::default();
        history.mark_lesson_complete("devops", "intro");
        let mut c = course();
        c.restore(&history);
        assert_eq!(c.completed_count(), 0);
    }

    #[test]
    fn empty_course_progress() {
        let c = Course::new("empty", "Empty", "Nothing", vec![]);
        assert_eq!(c.progress(), 0);
        assert!(!c.is_complete());
    }

    #[test]
    fn progress_rounds_half_up() {
        let lessons = (0..8)
            .map(|i| Lesson::new(&format!("l{i}"), "Lesson", LessonKind::Reading, 5))
            .collect();
        let mut c = Course::new("eight", "Eight", "Badge", lessons);
        c.complete_activity("l0").unwrap();
        // 1/8 = 12.5%
        assert_eq!(c.progress(), 13);
    }
}
