//! PostgreSQL implementation of the enrollment repository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::EnrollmentRepository;
use super::models::EnrollmentRow;
use super::schema::POSTGRES_INIT;
use crate::config::StorageBackend;
use crate::domain::{Enrollment, EnrollmentId, EnrollmentRecord};
use crate::error::GatewayError;

/// PostgreSQL-backed repository using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresEnrollmentRepository {
    pool: PgPool,
}

impl PostgresEnrollmentRepository {
    /// Creates a new repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `enrollments` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on database failure.
    pub async fn init_schema(&self) -> Result<(), GatewayError> {
        sqlx::query(POSTGRES_INIT).execute(&self.pool).await?;
        tracing::debug!("postgres schema ready");
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Postgres
    }

    async fn save(&self, record: EnrollmentRecord) -> Result<Enrollment, GatewayError> {
        let Some(id) = record.id else {
            let row = sqlx::query_as::<_, EnrollmentRow>(
                "INSERT INTO enrollments (name, email, course) VALUES ($1, $2, $3) \
                 RETURNING id, name, email, course",
            )
            .bind(record.name)
            .bind(record.email)
            .bind(record.course)
            .fetch_one(&self.pool)
            .await?;
            return Ok(row.into());
        };

        // An explicit id bypasses the identity sequence, so move the
        // sequence past it before later inserts can collide.
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, EnrollmentRow>(
            "INSERT INTO enrollments (id, name, email, course) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET \
                name = EXCLUDED.name, email = EXCLUDED.email, course = EXCLUDED.course \
             RETURNING id, name, email, course",
        )
        .bind(id.get())
        .bind(record.name)
        .bind(record.email)
        .bind(record.course)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('enrollments', 'id'), \
             GREATEST((SELECT MAX(id) FROM enrollments), 1))",
        )
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: EnrollmentId) -> Result<Option<Enrollment>, GatewayError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            "SELECT id, name, email, course FROM enrollments WHERE id = $1",
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
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
