//! Instructor form input

use serde::Deserialize;

use super::{NonNegative, RequiredText, ValidationError};

/// Raw instructor form (`id`, `name`, `department`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstructorForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
}

/// Validated instructor fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorInput {
    pub id: Option<i64>,
    pub name: RequiredText,
    pub department: RequiredText,
}

impl InstructorForm {
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            department: department.into(),
        }
    }

    pub fn validate(&self) -> Result<InstructorInput, ValidationError> {
        let name = RequiredText::new("name", &self.name)?;
        let department = RequiredText::new("department", &self.department)?;
        let id = NonNegative::parse_optional("id", &self.id)?.map(NonNegative::get);

        Ok(InstructorInput {
            id,
            name,
            department,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form() {
        let input = InstructorForm::new("Donna Joseph", "Computer Science")
            .validate()
            .unwrap();
        assert_eq!(input.department.as_str(), "Computer Science");
    }

    #[test]
    fn requires_both_fields() {
        assert_eq!(
            InstructorForm::new("", "Physics").validate().unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
        assert_eq!(
            InstructorForm::new("William Robertson", "").validate().unwrap_err(),
            ValidationError::Empty { field: "department" }
        );
    }
}
