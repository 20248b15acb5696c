//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement per operation, on a pooled connection
//! - Writes return the stored row (`RETURNING`), no read-after-write
//! - Constraint violations are reported as `DbError::Conflict`, no check-then-insert

pub mod students;
pub mod instructors;
pub mod courses;
pub mod enrollments;

pub use students::{StudentRepo, Student, EnrolledCourse};
pub use instructors::{InstructorRepo, Instructor};
pub use courses::{CourseRepo, Course, EnrolledStudent};
pub use enrollments::{EnrollmentRepo, Enrollment};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict on {resource}: {message}")]
    Conflict { resource: &'static str, message: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Which declared constraint a failed write tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    Unique,
    ForeignKey,
}

/// Classify a write error; `None` means it was not a constraint violation.
pub(crate) fn violation(err: &sqlx::Error) -> Option<Violation> {
    let db_err = err.as_database_error()?;
    if db_err.is_unique_violation() {
        Some(Violation::Unique)
    } else if db_err.is_foreign_key_violation() {
        Some(Violation::ForeignKey)
    } else {
        None
    }
}

/// Map a write error to `Conflict` when a constraint was violated.
///
/// `describe` turns the violation into the user-facing message.
pub(crate) fn write_error(
    resource: &'static str,
    err: sqlx::Error,
    describe: impl FnOnce(Violation) -> String,
) -> DbError {
    match violation(&err) {
        Some(v) => DbError::Conflict {
            resource,
            message: describe(v),
        },
        None => DbError::Sqlx(err),
    }
}
