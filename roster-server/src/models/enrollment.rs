//! Grade form input for enrolling a student in a course

use serde::Deserialize;

use super::{NonNegative, ValidationError};

/// Raw grade form (`grade`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradeForm {
    #[serde(default)]
    pub grade: String,
}

impl GradeForm {
    pub fn new(grade: impl Into<String>) -> Self {
        Self {
            grade: grade.into(),
        }
    }

    pub fn validate(&self) -> Result<NonNegative, ValidationError> {
        NonNegative::parse("grade", &self.grade)
    }
}
