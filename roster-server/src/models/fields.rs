//! Validated primitive field types
//!
//! Raw form strings are parsed into these before any storage call.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Digits only: no sign, no decimal point, no whitespace.
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("invalid digits regex"));

/// Required, non-blank text (names, departments, titles).
///
/// Only blankness is checked; accepted text is stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    /// Validate a required text field.
    ///
    /// # Example
    /// ```
    /// use roster_server::models::RequiredText;
    ///
    /// assert!(RequiredText::new("name", "Ada").is_ok());
    /// assert!(RequiredText::new("name", "").is_err());
    /// assert!(RequiredText::new("name", "   ").is_err());
    /// ```
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Non-negative integer parsed from a digits-only literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative(i64);

impl NonNegative {
    /// Parse a required non-negative integer.
    ///
    /// # Rules
    /// - Empty input is `Empty`
    /// - Anything other than ASCII digits is `NotAnInteger` (so `-1`, `1.5`, `+3` fail)
    /// - Values that overflow `i64` are `NotAnInteger`
    ///
    /// # Example
    /// ```
    /// use roster_server::models::NonNegative;
    ///
    /// assert_eq!(NonNegative::parse("credits", "95").unwrap().get(), 95);
    /// assert!(NonNegative::parse("credits", "-5").is_err());
    /// assert!(NonNegative::parse("credits", "abc").is_err());
    /// ```
    pub fn parse(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if !DIGITS_RE.is_match(s) {
            return Err(ValidationError::NotAnInteger { field });
        }

        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::NotAnInteger { field })
    }

    /// Parse an optional non-negative integer; empty input means "not given".
    pub fn parse_optional(field: &'static str, s: &str) -> Result<Option<Self>, ValidationError> {
        if s.is_empty() {
            return Ok(None);
        }
        Self::parse(field, s).map(Some)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}
