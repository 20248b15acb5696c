//! Schema for the roster tables
//!
//! - `students`, `instructors`, `courses`: `seq` keeps insertion order, `id` is the
//!   unique caller-assignable key the routes and foreign keys use
//! - `courses.instructor_id`: no action, an instructor cannot be deleted while teaching
//! - `enrollments`: CASCADE from both students and courses

use sqlx::{SqliteConnection, SqlitePool};

/// Tables in dependency order (children last).
const TABLES: [&str; 4] = ["students", "instructors", "courses", "enrollments"];

/// Create all tables and indexes if they do not exist.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running roster migrations...");

    let mut tx = pool.begin().await?;
    create_schema(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!("Roster migrations complete");
    Ok(())
}

/// Drop every roster table, then recreate the schema empty.
pub async fn reset(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::warn!("Dropping all roster tables");

    let mut tx = pool.begin().await?;
    for table in TABLES.iter().rev() {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await?;
    }
    create_schema(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!("Roster schema reinitialized");
    Ok(())
}

async fn create_schema(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id INTEGER NOT NULL UNIQUE,
            name TEXT NOT NULL,
            credits INTEGER NOT NULL CHECK (credits >= 0)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS instructors (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id INTEGER NOT NULL UNIQUE,
            name TEXT NOT NULL,
            department TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id INTEGER NOT NULL UNIQUE,
            title TEXT NOT NULL,
            -- NO ACTION, not RESTRICT: SQLite reports RESTRICT as a trigger
            -- failure, NO ACTION as a foreign key violation
            instructor_id INTEGER NOT NULL
                REFERENCES instructors(id)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    // Surrogate id keeps insertion order; duplicate (student, course) pairs are allowed
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS enrollments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL
                REFERENCES students(id) ON DELETE CASCADE,
            course_id INTEGER NOT NULL
                REFERENCES courses(id) ON DELETE CASCADE,
            grade INTEGER NOT NULL CHECK (grade >= 0)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    create_indexes(conn).await
}

async fn create_indexes(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_courses_instructor ON courses(instructor_id)")
        .execute(&mut *conn)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_enrollments_student ON enrollments(student_id)")
        .execute(&mut *conn)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_enrollments_course ON enrollments(course_id)")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
