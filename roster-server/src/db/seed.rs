//! Development fixture: a small, fixed set of sample rows
//!
//! Loaded by `roster init-db --seed`. Trailing spaces in some names are
//! part of the fixture.

use sqlx::SqlitePool;

const STUDENTS: [(i64, &str, i64); 7] = [
    (387, "John Walker", 93),
    (209, "David Jameson", 87),
    (101, "Emma Wells", 57),
    (190, "Nisha Singh ", 92),
    (978, "Jack Thompson ", 100),
    (350, "Ben Joseph ", 79),
    (270, "Kate Jimpson", 68),
];

const INSTRUCTORS: [(i64, &str, &str); 7] = [
    (456, "Jim George", "Statistics"),
    (589, "Kevin Mathews", "Information Systems"),
    (821, "John Sullins ", "Health Sciences"),
    (954, "William Robertson ", "Physics"),
    (673, "Sandra Wilson ", "Biology"),
    (535, "Donna Joseph", "Computer Science"),
    (990, "Natalia Smith ", "Chemistry"),
];

const COURSES: [(i64, &str, i64); 4] = [
    (9076, "Software Engineering", 535),
    (1028, "Organic Chemistry I ", 990),
    (7654, "Health Informatics", 821),
    (8721, "Database Systems", 589),
];

/// (student_id, course_id, grade)
const ENROLLMENTS: [(i64, i64, i64); 7] = [
    (387, 9076, 100),
    (209, 1028, 56),
    (101, 7654, 81),
    (190, 9076, 77),
    (978, 1028, 10),
    (350, 8721, 95),
    (270, 8721, 88),
];

/// Row counts inserted by [`seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub students: usize,
    pub instructors: usize,
    pub courses: usize,
    pub enrollments: usize,
}

/// Insert the fixture into an empty schema (atomic).
///
/// Fails without inserting anything if any fixture id is already taken.
pub async fn seed(pool: &SqlitePool) -> Result<SeedSummary, sqlx::Error> {
    let mut tx = pool.begin().await?;

    for (id, name, credits) in STUDENTS {
        sqlx::query("INSERT INTO students (id, name, credits) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(credits)
            .execute(&mut *tx)
            .await?;
    }

    for (id, name, department) in INSTRUCTORS {
        sqlx::query("INSERT INTO instructors (id, name, department) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(department)
            .execute(&mut *tx)
            .await?;
    }

    for (id, title, instructor_id) in COURSES {
        sqlx::query("INSERT INTO courses (id, title, instructor_id) VALUES (?, ?, ?)")
            .bind(id)
            .bind(title)
            .bind(instructor_id)
            .execute(&mut *tx)
            .await?;
    }

    for (student_id, course_id, grade) in ENROLLMENTS {
        sqlx::query("INSERT INTO enrollments (student_id, course_id, grade) VALUES (?, ?, ?)")
            .bind(student_id)
            .bind(course_id)
            .bind(grade)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let summary = SeedSummary {
        students: STUDENTS.len(),
        instructors: INSTRUCTORS.len(),
        courses: COURSES.len(),
        enrollments: ENROLLMENTS.len(),
    };
    tracing::info!(?summary, "Seeded sample roster");
    Ok(summary)
}
