//! Student form input

use serde::Deserialize;

use super::{NonNegative, RequiredText, ValidationError};

/// Raw student form as submitted (`id`, `name`, `credits`).
///
/// Missing fields deserialize as empty strings so they fail validation
/// with a field message instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub credits: String,
}

/// Validated student fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInput {
    /// Caller-supplied id; `None` lets the store assign one
    pub id: Option<i64>,
    pub name: RequiredText,
    pub credits: NonNegative,
}

impl StudentForm {
    pub fn new(name: impl Into<String>, credits: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            credits: credits.into(),
        }
    }

    /// Check fields in form order: name, credits, then the optional id.
    pub fn validate(&self) -> Result<StudentInput, ValidationError> {
        let name = RequiredText::new("name", &self.name)?;
        let credits = NonNegative::parse("credits", &self.credits)?;
        let id = NonNegative::parse_optional("id", &self.id)?.map(NonNegative::get);

        Ok(StudentInput { id, name, credits })
    }
}
