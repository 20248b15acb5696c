//! Instructor repository
//!
//! Deleting an instructor who still teaches a course is refused by the
//! schema's foreign key and reported as a conflict.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{write_error, Course, DbError, Violation};
use crate::models::InstructorInput;

/// Instructor record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Instructor {
    pub id: i64,
    pub name: String,
    pub department: String,
}

/// Instructor repository
pub struct InstructorRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> InstructorRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i64) -> Result<Instructor, DbError> {
        sqlx::query_as::<_, Instructor>(
            "SELECT id, name, department FROM instructors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("instructor", id))
    }

    pub async fn list(&self) -> Result<Vec<Instructor>, DbError> {
        let instructors =
            sqlx::query_as("SELECT id, name, department FROM instructors ORDER BY seq")
                .fetch_all(self.pool)
                .await?;
        Ok(instructors)
    }

    /// Courses taught by the instructor, in insertion order.
    pub async fn courses(&self, instructor_id: i64) -> Result<Vec<Course>, DbError> {
        let courses = sqlx::query_as(
            r#"
            SELECT id, title, instructor_id
            FROM courses
            WHERE instructor_id = ?
            ORDER BY seq
            "#,
        )
        .bind(instructor_id)
        .fetch_all(self.pool)
        .await?;
        Ok(courses)
    }

    pub async fn create(&self, input: InstructorInput) -> Result<Instructor, DbError> {
        let requested = input.id;
        sqlx::query_as(
            r#"
            INSERT INTO instructors (id, name, department)
            VALUES (COALESCE(?, (SELECT IFNULL(MAX(id), 0) + 1 FROM instructors)), ?, ?)
            RETURNING id, name, department
            "#,
        )
        .bind(input.id)
        .bind(input.name.as_str())
        .bind(input.department.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            write_error("instructor", e, |v| match (v, requested) {
                (Violation::Unique, Some(id)) => format!("instructor {id} already exists"),
                _ => "instructor could not be stored".to_owned(),
            })
        })
    }

    pub async fn update(&self, id: i64, input: InstructorInput) -> Result<Instructor, DbError> {
        sqlx::query_as::<_, Instructor>(
            r#"
            UPDATE instructors SET name = ?, department = ?
            WHERE id = ?
            RETURNING id, name, department
            "#,
        )
        .bind(input.name.as_str())
        .bind(input.department.as_str())
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("instructor", id))
    }

    /// Delete an instructor, returning the deleted record.
    ///
    /// Fails with `Conflict` while any course references the instructor.
    pub async fn delete(&self, id: i64) -> Result<Instructor, DbError> {
        sqlx::query_as::<_, Instructor>(
            "DELETE FROM instructors WHERE id = ? RETURNING id, name, department",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            write_error("instructor", e, |_| {
                format!("instructor {id} is still assigned to one or more courses")
            })
        })?
        .ok_or_else(|| DbError::not_found("instructor", id))
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM instructors")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::CourseRepo;
    use crate::models::InstructorForm;
    use crate::test_support::{migrated_pool, seeded_pool};

    fn input(name: &str, department: &str) -> InstructorInput {
        InstructorForm::new(name, department).validate().unwrap()
    }

    #[tokio::test]
    async fn create_then_get() {
        let pool = migrated_pool().await;
        let repo = InstructorRepo::new(&pool);

        let created = repo.create(input("Grace Hopper", "Computer Science")).await.unwrap();

        assert_eq!(repo.get(created.id).await.unwrap(), created);
        assert_eq!(created.department, "Computer Science");
    }

    #[tokio::test]
    async fn update_changes_fields() {
        let pool = seeded_pool().await;
        let repo = InstructorRepo::new(&pool);

        let updated = repo.update(456, input("Jim George", "Mathematics")).await.unwrap();

        assert_eq!(updated.department, "Mathematics");
        assert_eq!(repo.get(456).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn courses_for_instructor() {
        let pool = seeded_pool().await;

        let courses = InstructorRepo::new(&pool).courses(535).await.unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].title, "Software Engineering");
        assert!(InstructorRepo::new(&pool).courses(456).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_without_courses() {
        let pool = seeded_pool().await;
        let repo = InstructorRepo::new(&pool);

        let deleted = repo.delete(954).await.unwrap();

        assert_eq!(deleted.name, "William Robertson ");
        assert!(matches!(repo.get(954).await.unwrap_err(), DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_while_teaching_is_conflict() {
        let pool = seeded_pool().await;
        let repo = InstructorRepo::new(&pool);

        let err = repo.delete(535).await.unwrap_err();

        assert!(matches!(err, DbError::Conflict { resource: "instructor", .. }));
        assert_eq!(repo.get(535).await.unwrap().name, "Donna Joseph");
        assert_eq!(CourseRepo::new(&pool).instructor(9076).await.unwrap().id, 535);
    }

    #[tokio::test]
    async fn list_is_in_insertion_order() {
        let pool = seeded_pool().await;

        let ids: Vec<_> = InstructorRepo::new(&pool)
            .list()
            .await
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();

        assert_eq!(ids, vec![456, 589, 821, 954, 673, 535, 990]);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let pool = migrated_pool().await;
        let err = InstructorRepo::new(&pool).delete(1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "instructor", .. }));
    }
}
