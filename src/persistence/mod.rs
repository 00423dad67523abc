//! Persistence layer: the enrollment storage abstraction and its adapters.
//!
//! [`EnrollmentRepository`] is the capability set every store provides
//! (save, find by id, find all, delete by id). One adapter exists per
//! supported store; [`connect`] picks one from the gateway configuration.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod schema;
pub mod sqlite;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::{GatewayConfig, StorageBackend};
use crate::domain::{Enrollment, EnrollmentId, EnrollmentRecord};
use crate::error::GatewayError;

pub use memory::InMemoryEnrollmentRepository;
pub use postgres::PostgresEnrollmentRepository;
pub use sqlite::SqliteEnrollmentRepository;

/// Storage gateway for enrollment records.
///
/// Implementations must assign ids from a monotonically increasing,
/// per-store sequence, and each call must be atomic at the store level.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync + fmt::Debug {
    /// Which adapter this is.
    fn backend(&self) -> StorageBackend;

    /// Stores `record` and returns it with its id populated.
    ///
    /// A record without an id is inserted and receives the next identity
    /// value. A record with an id is upserted on the primary key.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the store rejects the write or is
    /// unreachable.
    async fn save(&self, record: EnrollmentRecord) -> Result<Enrollment, GatewayError>;

    /// Looks up a single record.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the store is unreachable.
    async fn find_by_id(&self, id: EnrollmentId) -> Result<Option<Enrollment>, GatewayError>;

    /// Returns every stored record ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the store is unreachable.
    async fn find_all(&self) -> Result<Vec<Enrollment>, GatewayError>;

    /// Deletes a record, returning `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the store is unreachable.
    async fn delete_by_id(&self, id: EnrollmentId) -> Result<bool, GatewayError>;

    /// Releases pooled connections. Called once during shutdown.
    async fn close(&self) {}
}

/// Opens the store named by `config.database_url`, creates the schema if
/// needed, and returns the matching adapter.
///
/// # Errors
///
/// Returns a [`GatewayError::PersistenceError`] if the store cannot be
/// reached or the schema cannot be created.
pub async fn connect(config: &GatewayConfig) -> Result<Arc<dyn EnrollmentRepository>, GatewayError> {
    match config.storage_backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryEnrollmentRepository::new())),
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .min_connections(config.database_min_connections)
                .acquire_timeout(config.connect_timeout())
                .connect(&config.database_url)
                .await?;
            let repo = PostgresEnrollmentRepository::new(pool);
            repo.init_schema().await?;
            Ok(Arc::new(repo))
        }
        StorageBackend::Sqlite => {
            let options =
                SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
            let mut pool_options =
                SqlitePoolOptions::new().acquire_timeout(config.connect_timeout());
            // Every in-memory connection is a separate database, so the pool
            // must hold exactly one connection and never recycle it.
            if is_in_memory_sqlite(&config.database_url) {
                pool_options = pool_options
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
            } else {
                pool_options = pool_options
                    .max_connections(config.database_max_connections)
                    .min_connections(config.database_min_connections);
            }
            let pool = pool_options.connect_with(options).await?;
            let repo = SqliteEnrollmentRepository::new(pool);
            repo.init_schema().await?;
            Ok(Arc::new(repo))
        }
    }
}

fn is_in_memory_sqlite(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_sqlite_urls() {
        assert!(is_in_memory_sqlite("sqlite::memory:"));
        assert!(is_in_memory_sqlite("sqlite:file:enrollments?mode=memory&cache=shared"));
        assert!(!is_in_memory_sqlite("sqlite://data/enrollments.db"));
    }

    #[tokio::test]
    async fn connect_memory_backend() {
        let config = GatewayConfig {
            database_url: "memory".to_string(),
            storage_backend: StorageBackend::Memory,
            ..GatewayConfig::default()
        };
        let Ok(repo) = connect(&config).await else {
            panic!("memory backend must always connect");
        };
        assert_eq!(repo.backend(), StorageBackend::Memory);
    }

    #[tokio::test]
    async fn in_memory_sqlite_keeps_rows_across_calls() {
        let Ok(repo) = connect(&GatewayConfig::default()).await else {
            panic!("sqlite::memory: must connect");
        };
        assert_eq!(repo.backend(), StorageBackend::Sqlite);

        let Ok(saved) = repo.save(EnrollmentRecord::default()).await else {
            panic!("insert failed");
        };
        let Ok(all) = repo.find_all().await else {
            panic!("find_all failed");
        };
        assert_eq!(all, vec![saved]);
    }
}
