//! Course form input

use serde::Deserialize;

use super::{NonNegative, RequiredText, ValidationError};

/// Raw course form (`id`, `title`, `instructor_id`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub instructor_id: String,
}

/// Validated course fields.
///
/// The instructor reference is only checked for shape here; the store
/// rejects ids with no matching instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseInput {
    pub id: Option<i64>,
    pub title: RequiredText,
    pub instructor_id: i64,
}

impl CourseForm {
    pub fn new(title: impl Into<String>, instructor_id: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            instructor_id: instructor_id.into(),
        }
    }

    pub fn validate(&self) -> Result<CourseInput, ValidationError> {
        let title = RequiredText::new("title", &self.title)?;
        let instructor_id = NonNegative::parse("instructor id", &self.instructor_id)?.get();
        let id = NonNegative::parse_optional("id", &self.id)?.map(NonNegative::get);

        Ok(CourseInput {
            id,
            title,
            instructor_id,
        })
    }
}
