//! Validation error types

use std::fmt;

/// Validation error for submitted form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing, empty, or whitespace only
    Empty { field: &'static str },

    /// Field must be a non-negative integer literal (digits only)
    NotAnInteger { field: &'static str },
}

impl ValidationError {
    /// Name of the offending form field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::NotAnInteger { field } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::NotAnInteger { field } => write!(f, "{} must be an integer", field),
        }
    }
}

impl std::error::Error for ValidationError {}
