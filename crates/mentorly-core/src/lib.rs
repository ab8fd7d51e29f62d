//! mentorly-core: Quiz evaluation, adaptive difficulty, course progress and entitlements.
//!
//! This crate defines the data model, scoring logic, subscription entitlement
//! rules, and the service capability traits that the rest of mentorly builds on.

pub mod catalog;
pub mod course;
pub mod entitlements;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod history;
pub mod model;
pub mod parser;
pub mod results;
pub mod statistics;
pub mod traits;

pub use course::{Course, Lesson, LessonKind};
pub use error::{AssessmentError, CourseError, EntitlementError};
pub use evaluator::{evaluate, select_next_difficulty, AttemptSession};
pub use entitlements::{format_price, EntitlementResolver};
