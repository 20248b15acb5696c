//! Custom Axum extractors
//!
//! Path ids follow the integer route converter: digits only, anything else
//! is a 404 rather than a 400.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::NonNegative;

/// Extract a numeric record id from a single-parameter path
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| no_route(String::new()))?;

        parse_id(&raw).map(Self).ok_or_else(|| no_route(raw))
    }
}

/// What to do with one of a student's courses on the edit page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseAction {
    /// `add{course_id}`: enroll with a grade
    Add(i64),
    /// `delete{course_id}`: unenroll
    Delete(i64),
}

impl CourseAction {
    /// Parse an `add123` / `delete123` path segment.
    pub fn parse(segment: &str) -> Option<Self> {
        if let Some(rest) = segment.strip_prefix("add") {
            parse_id(rest).map(Self::Add)
        } else if let Some(rest) = segment.strip_prefix("delete") {
            parse_id(rest).map(Self::Delete)
        } else {
            None
        }
    }
}

/// Extract `/students/{id}/edit/{action}`
pub struct StudentCourseAction {
    pub student_id: i64,
    pub action: CourseAction,
}

impl<S> FromRequestParts<S> for StudentCourseAction
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((raw_id, segment)): Path<(String, String)> =
            Path::from_request_parts(parts, state)
                .await
                .map_err(|_| no_route(String::new()))?;

        let student_id = parse_id(&raw_id).ok_or_else(|| no_route(raw_id.clone()))?;
        let action = CourseAction::parse(&segment).ok_or_else(|| no_route(segment.clone()))?;

        Ok(Self { student_id, action })
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    NonNegative::parse("id", raw).ok().map(NonNegative::get)
}

fn no_route(id: String) -> ApiError {
    ApiError::NotFound { resource: "page", id }
}
