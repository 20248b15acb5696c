//! Student repository
//!
//! - create: INSERT ... RETURNING, caller id optional (default: highest id + 1)
//! - delete: DELETE ... RETURNING, enrollments go with the row (CASCADE)
//! - courses: JOIN through enrollments, carries the grade

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{write_error, DbError, Violation};
use crate::models::StudentInput;

/// Student record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub credits: i64,
}

/// A course a student is enrolled in, with the grade for that enrollment
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct EnrolledCourse {
    pub id: i64,
    pub title: String,
    pub instructor_id: i64,
    pub grade: i64,
}

/// Student repository
pub struct StudentRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StudentRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a single student by id.
    pub async fn get(&self, id: i64) -> Result<Student, DbError> {
        sqlx::query_as::<_, Student>("SELECT id, name, credits FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("student", id))
    }

    /// List all students in insertion order.
    pub async fn list(&self) -> Result<Vec<Student>, DbError> {
        let students = sqlx::query_as("SELECT id, name, credits FROM students ORDER BY seq")
            .fetch_all(self.pool)
            .await?;
        Ok(students)
    }

    /// Courses the student is enrolled in, in enrollment order.
    ///
    /// An unknown student simply has no courses.
    pub async fn courses(&self, student_id: i64) -> Result<Vec<EnrolledCourse>, DbError> {
        let courses = sqlx::query_as(
            r#"
            SELECT c.id, c.title, c.instructor_id, e.grade
            FROM enrollments e
            JOIN courses c ON c.id = e.course_id
            WHERE e.student_id = ?
            ORDER BY e.id
            "#,
        )
        .bind(student_id)
        .fetch_all(self.pool)
        .await?;
        Ok(courses)
    }

    /// Insert a student, letting the store assign the id when none is given.
    pub async fn create(&self, input: StudentInput) -> Result<Student, DbError> {
        let requested = input.id;
        sqlx::query_as(
            r#"
            INSERT INTO students (id, name, credits)
            VALUES (COALESCE(?, (SELECT IFNULL(MAX(id), 0) + 1 FROM students)), ?, ?)
            RETURNING id, name, credits
            "#,
        )
        .bind(input.id)
        .bind(input.name.as_str())
        .bind(input.credits.get())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            write_error("student", e, |v| match (v, requested) {
                (Violation::Unique, Some(id)) => format!("student {id} already exists"),
                _ => "student could not be stored".to_owned(),
            })
        })
    }

    /// Overwrite name and credits. The id in `input` is ignored.
    pub async fn update(&self, id: i64, input: StudentInput) -> Result<Student, DbError> {
        sqlx::query_as::<_, Student>(
            r#"
            UPDATE students SET name = ?, credits = ?
            WHERE id = ?
            RETURNING id, name, credits
            "#,
        )
        .bind(input.name.as_str())
        .bind(input.credits.get())
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("student", id))
    }

    /// Delete a student and their enrollments, returning the deleted record.
    pub async fn delete(&self, id: i64) -> Result<Student, DbError> {
        sqlx::query_as::<_, Student>(
            "DELETE FROM students WHERE id = ? RETURNING id, name, credits",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("student", id))
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
