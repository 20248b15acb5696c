//! Course repository
//!
//! A course names exactly one instructor; the reference is checked by
//! the schema, so create/update with an unknown instructor is a conflict.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{write_error, DbError, Instructor, Violation};
use crate::models::CourseInput;

/// Course record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub instructor_id: i64,
}

/// A student enrolled in a course, with the grade for that enrollment
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct EnrolledStudent {
    pub id: i64,
    pub name: String,
    pub credits: i64,
    pub grade: i64,
}

/// Course repository
pub struct CourseRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CourseRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i64) -> Result<Course, DbError> {
        sqlx::query_as::<_, Course>("SELECT id, title, instructor_id FROM courses WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("course", id))
    }

    pub async fn list(&self) -> Result<Vec<Course>, DbError> {
        let courses = sqlx::query_as("SELECT id, title, instructor_id FROM courses ORDER BY seq")
            .fetch_all(self.pool)
            .await?;
        Ok(courses)
    }

    /// Students enrolled in the course, in enrollment order.
    pub async fn students(&self, course_id: i64) -> Result<Vec<EnrolledStudent>, DbError> {
        let students = sqlx::query_as(
            r#"
            SELECT s.id, s.name, s.credits, e.grade
            FROM enrollments e
            JOIN students s ON s.id = e.student_id
            WHERE e.course_id = ?
            ORDER BY e.id
            "#,
        )
        .bind(course_id)
        .fetch_all(self.pool)
        .await?;
        Ok(students)
    }

    /// The instructor teaching the course.
    ///
    /// `NotFound` when the course does not exist.
    pub async fn instructor(&self, course_id: i64) -> Result<Instructor, DbError> {
        sqlx::query_as::<_, Instructor>(
            r#"
            SELECT i.id, i.name, i.department
            FROM courses c
            JOIN instructors i ON i.id = c.instructor_id
            WHERE c.id = ?
            "#,
        )
        .bind(course_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "instructor for course",
            id: course_id.to_string(),
        })
    }

    pub async fn create(&self, input: CourseInput) -> Result<Course, DbError> {
        let requested = input.id;
        let instructor_id = input.instructor_id;
        sqlx::query_as(
            r#"
            INSERT INTO courses (id, title, instructor_id)
            VALUES (COALESCE(?, (SELECT IFNULL(MAX(id), 0) + 1 FROM courses)), ?, ?)
            RETURNING id, title, instructor_id
            "#,
        )
        .bind(input.id)
        .bind(input.title.as_str())
        .bind(input.instructor_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            write_error("course", e, |v| match (v, requested) {
                (Violation::ForeignKey, _) => unknown_instructor(instructor_id),
                (Violation::Unique, Some(id)) => format!("course {id} already exists"),
                (Violation::Unique, None) => "course could not be stored".to_owned(),
            })
        })
    }

    pub async fn update(&self, id: i64, input: CourseInput) -> Result<Course, DbError> {
        let instructor_id = input.instructor_id;
        sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses SET title = ?, instructor_id = ?
            WHERE id = ?
            RETURNING id, title, instructor_id
            "#,
        )
        .bind(input.title.as_str())
        .bind(input.instructor_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| write_error("course", e, |_| unknown_instructor(instructor_id)))?
        .ok_or_else(|| DbError::not_found("course", id))
    }

    /// Delete a course and its enrollments, returning the deleted record.
    pub async fn delete(&self, id: i64) -> Result<Course, DbError> {
        sqlx::query_as::<_, Course>(
            "DELETE FROM courses WHERE id = ? RETURNING id, title, instructor_id",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("course", id))
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

fn unknown_instructor(instructor_id: i64) -> String {
    format!("instructor {instructor_id} does not exist")
}
