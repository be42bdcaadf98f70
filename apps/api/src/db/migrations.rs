use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("migration {id} ({description}) failed: {source}")]
    Statement {
        id: i64,
        description: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("failed to run migrations: {0}")]
    Sqlite(#[from] sqlx::Error),
}

struct Migration {
    id: i64,
    description: &'static str,
    statements: &'static [&'static str],
}

const MIGRATIONS: &[Migration] = &[Migration {
    id: 1,
    description: "job board schema",
    statements: &[
        r#"
CREATE TABLE IF NOT EXISTS job_postings (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    company TEXT NOT NULL,
    location TEXT NOT NULL,
    description TEXT NOT NULL,
    category TEXT NOT NULL,
    job_type TEXT NOT NULL,
    salary TEXT,
    posted_date TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    deadline TEXT,
    approved BOOLEAN NOT NULL DEFAULT 0
)
"#,
        r#"
CREATE INDEX IF NOT EXISTS idx_job_postings_approved_posted
    ON job_postings(approved, posted_date)
"#,
        r#"
CREATE TABLE IF NOT EXISTS feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type TEXT NOT NULL,
    message TEXT NOT NULL,
    email TEXT,
    submission_date TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)
"#,
        r#"
CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    job_id INTEGER NOT NULL REFERENCES job_postings(id) ON DELETE CASCADE,
    student_name TEXT NOT NULL,
    student_email TEXT NOT NULL,
    resume_filename TEXT,
    cover_letter TEXT,
    submission_date TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)
"#,
        r#"
CREATE INDEX IF NOT EXISTS idx_applications_job_id ON applications(job_id)
"#,
        r#"
CREATE TABLE IF NOT EXISTS recommendation_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_name TEXT NOT NULL,
    student_email TEXT NOT NULL,
    teacher_name TEXT NOT NULL,
    teacher_email TEXT NOT NULL,
    deadline TEXT NOT NULL,
    purpose TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)
"#,
    ],
}];

/// Applies every pending migration inside a single transaction.
/// Either the whole schema lands or nothing does; the caller aborts startup
/// on error.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrationError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    id INTEGER PRIMARY KEY,
    description TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#,
    )
    .execute(&mut *tx)
    .await?;

    let applied: Vec<i64> = sqlx::query("SELECT id FROM schema_migrations")
        .fetch_all(&mut *tx)
        .await?
        .iter()
        .map(|row| row.get::<i64, _>("id"))
        .collect();

    for migration in MIGRATIONS {
        if applied.contains(&migration.id) {
            continue;
        }

        for statement in migration.statements {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|source| MigrationError::Statement {
                    id: migration.id,
                    description: migration.description,
                    source,
                })?;
        }

        sqlx::query("INSERT INTO schema_migrations (id, description) VALUES (?, ?)")
            .bind(migration.id)
            .bind(migration.description)
            .execute(&mut *tx)
            .await?;

        info!(
            migration_id = migration.id,
            description = migration.description,
            "applied migration"
        );
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{empty_test_pool, test_pool};

    #[tokio::test]
    async fn test_creates_all_tables() {
        let pool = test_pool().await;
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        for expected in [
            "applications",
            "feedback",
            "job_postings",
            "recommendation_requests",
            "schema_migrations",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
        assert!(!tables.iter().any(|t| t == "applied_jobs"));
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, MIGRATIONS.len() as i64);
    }

    #[tokio::test]
    async fn test_failed_migration_leaves_no_tables() {
        let pool = empty_test_pool().await;
        // An existing table with an index's name makes CREATE INDEX fail
        // after job_postings was already created in the same transaction.
        sqlx::query("CREATE TABLE idx_job_postings_approved_posted (id INTEGER)")
            .execute(&pool)
            .await
            .unwrap();

        let err = run_migrations(&pool).await.unwrap_err();
        assert!(matches!(err, MigrationError::Statement { id: 1, .. }));

        let leaked: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('job_postings', 'schema_migrations')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(leaked, 0);
    }
}
