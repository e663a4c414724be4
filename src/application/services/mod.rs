//! Application services

pub mod course_level;

pub use course_level::{CourseLevel, CourseLevelService};
