//! Enrollment repository - the student/course association carrying a grade

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{write_error, DbError};
use crate::models::NonNegative;

/// Enrollment record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub grade: i64,
}

/// Enrollment repository
pub struct EnrollmentRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EnrollmentRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Enroll a student in a course with a grade.
    ///
    /// Repeat enrollments of the same pair are stored as separate rows.
    /// An unknown student or course is a `Conflict`.
    pub async fn enroll(
        &self,
        student_id: i64,
        course_id: i64,
        grade: NonNegative,
    ) -> Result<Enrollment, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO enrollments (student_id, course_id, grade)
            VALUES (?, ?, ?)
            RETURNING id, student_id, course_id, grade
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .bind(grade.get())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            write_error("enrollment", e, |_| {
                format!("student {student_id} or course {course_id} does not exist")
            })
        })
    }

    /// Remove every enrollment of the student in the course.
    ///
    /// Returns how many rows were removed; zero is not an error.
    pub async fn unenroll(&self, student_id: i64, course_id: i64) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE student_id = ? AND course_id = ?")
            .bind(student_id)
            .bind(course_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM enrollments")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StudentRepo;
    use crate::test_support::seeded_pool;

    fn grade(raw: &str) -> NonNegative {
        NonNegative::parse("grade", raw).unwrap()
    }

    #[tokio::test]
    async fn enroll_then_unenroll() {
        let pool = seeded_pool().await;
        let repo = EnrollmentRepo::new(&pool);
        let students = StudentRepo::new(&pool);

        let enrollment = repo.enroll(101, 8721, grade("73")).await.unwrap();
        assert_eq!(enrollment.grade, 73);
        assert!(students.courses(101).await.unwrap().iter().any(|c| c.id == 8721));

        assert_eq!(repo.unenroll(101, 8721).await.unwrap(), 1);
        assert!(!students.courses(101).await.unwrap().iter().any(|c| c.id == 8721));
    }

    #[tokio::test]
    async fn duplicate_enrollments_are_kept_and_removed_together() {
        let pool = seeded_pool().await;
        let repo = EnrollmentRepo::new(&pool);

        let first = repo.enroll(350, 1028, grade("40")).await.unwrap();
        let second = repo.enroll(350, 1028, grade("60")).await.unwrap();
        assert!(second.id > first.id);

        assert_eq!(repo.unenroll(350, 1028).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unenroll_without_match_is_noop() {
        let pool = seeded_pool().await;
        let repo = EnrollmentRepo::new(&pool);
        let before = repo.count().await.unwrap();

        assert_eq!(repo.unenroll(387, 1028).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn enroll_unknown_course_is_conflict() {
        let pool = seeded_pool().await;
        let repo = EnrollmentRepo::new(&pool);
        let before = repo.count().await.unwrap();

        let err = repo.enroll(387, 1, grade("90")).await.unwrap_err();

        assert!(matches!(err, DbError::Conflict { resource: "enrollment", .. }));
        assert_eq!(repo.count().await.unwrap(), before);
    }
}
