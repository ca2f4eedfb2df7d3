//! Courses: identified by subject-course code, resolved to Sections via the
//! store rather than owning them directly, so a course and its sections
//! never need to reference each other in a cycle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub subject_course: String,
    pub title: Option<String>,
}

impl Course {
    pub fn new(subject_course: impl Into<String>, title: Option<String>) -> Self {
        Course {
            subject_course: subject_course.into(),
            title,
        }
    }
}
