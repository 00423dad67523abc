//! SQLite implementation of the enrollment repository.
//!
//! Used for single-node deployments and as the default `sqlite::memory:`
//! store, which lives as long as the process.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::EnrollmentRepository;
use super::models::EnrollmentRow;
use super::schema::SQLITE_INIT;
use crate::config::StorageBackend;
use crate::domain::{Enrollment, EnrollmentId, EnrollmentRecord};
use crate::error::GatewayError;

/// SQLite-backed repository using `sqlx::SqlitePool`.
#[derive(Debug, Clone)]
pub struct SqliteEnrollmentRepository {
    pool: SqlitePool,
}

impl SqliteEnrollmentRepository {
    /// Creates a new repository over the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the `enrollments` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on database failure.
    pub async fn init_schema(&self) -> Result<(), GatewayError> {
        sqlx::query(SQLITE_INIT).execute(&self.pool).await?;
        tracing::debug!("sqlite schema ready");
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for SqliteEnrollmentRepository {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Sqlite
    }

    async fn save(&self, record: EnrollmentRecord) -> Result<Enrollment, GatewayError> {
        let row = match record.id {
            None => {
                sqlx::query_as::<_, EnrollmentRow>(
                    "INSERT INTO enrollments (name, email, course) VALUES (?, ?, ?) \
                     RETURNING id, name, email, course",
                )
                .bind(record.name)
                .bind(record.email)
                .bind(record.course)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => {
                sqlx::query_as::<_, EnrollmentRow>(
                    r#"
                    INSERT INTO enrollments (id, name, email, course) VALUES (?, ?, ?, ?)
                    ON CONFLICT(id) DO UPDATE SET
                        name=excluded.name,
                        email=excluded.email,
                        course=excluded.course
                    RETURNING id, name, email, course
                    "#,
                )
                .bind(id.get())
                .bind(record.name)
                .bind(record.email)
                .bind(record.course)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(row.into())
    }

    async fn find_by_id(&self, id: EnrollmentId) -> Result<Option<Enrollment>, GatewayError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            "SELECT id, name, email, course FROM enrollments WHERE id = ?",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Enrollment::from))
    }

    async fn find_all(&self) -> Result<Vec<Enrollment>, GatewayError> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(
            "SELECT id, name, email, course FROM enrollments ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Enrollment::from).collect())
    }

    async fn delete_by_id(&self, id: EnrollmentId) -> Result<bool, GatewayError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
