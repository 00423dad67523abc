//! In-memory implementation of the enrollment repository.
//!
//! Selected with `DATABASE_URL=memory`. Holds rows in a `BTreeMap` behind
//! a single [`tokio::sync::RwLock`], so reads are concurrent and writes
//! (including identity generation) are serialized.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::EnrollmentRepository;
use crate::config::StorageBackend;
use crate::domain::{Enrollment, EnrollmentId, EnrollmentRecord};
use crate::error::GatewayError;

/// Process-local enrollment store.
///
/// Identity generation mirrors an auto-increment column: ids start at 1,
/// grow by one per insert, and are never reused after a delete.
#[derive(Debug, Default)]
pub struct InMemoryEnrollmentRepository {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<EnrollmentId, Enrollment>,
    /// Highest id ever stored.
    high_water: i64,
}

impl InMemoryEnrollmentRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    async fn save(&self, record: EnrollmentRecord) -> Result<Enrollment, GatewayError> {
        let mut state = self.state.write().await;
        let id = match record.id {
            Some(id) => id,
            None => state
                .high_water
                .checked_add(1)
                .map(EnrollmentId::new)
                .ok_or_else(|| GatewayError::Internal("enrollment id space exhausted".into()))?,
        };
        state.high_water = state.high_water.max(id.get());

        let stored = Enrollment::from_record(id, record);
        state.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: EnrollmentId) -> Result<Option<Enrollment>, GatewayError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Enrollment>, GatewayError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: EnrollmentId) -> Result<bool, GatewayError> {
        Ok(self.state.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use tokio_test::assert_ok;

    fn record(name: &str) -> EnrollmentRecord {
        EnrollmentRecord::new(Some(name.to_string()), None, Some("CS".to_string()))
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let repo = InMemoryEnrollmentRepository::new();
        for expected in 1..=3 {
            let Ok(saved) = repo.save(record("Ana")).await else {
                panic!("insert failed");
            };
            assert_eq!(saved.id.get(), expected);
        }
    }

    #[tokio::test]
    async fn explicit_id_upserts_and_advances_identity() {
        let repo = InMemoryEnrollmentRepository::new();
        let mut explicit = record("Bia");
        explicit.id = Some(EnrollmentId::new(10));
        assert_ok!(repo.save(explicit.clone()).await);

        explicit.course = Some("Math".to_string());
        let Ok(updated) = repo.save(explicit).await else {
            panic!("upsert failed");
        };
        assert_eq!(updated.course.as_deref(), Some("Math"));

        let Ok(next) = repo.save(record("Caio")).await else {
            panic!("insert failed");
        };
        assert_eq!(next.id.get(), 11);

        let Ok(all) = repo.find_all().await else {
            panic!("find_all failed");
        };
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn delete_does_not_free_ids() {
        let repo = InMemoryEnrollmentRepository::new();
        let Ok(first) = repo.save(record("Ana")).await else {
            panic!("insert failed");
        };
        assert!(matches!(repo.delete_by_id(first.id).await, Ok(true)));
        assert!(matches!(repo.find_by_id(first.id).await, Ok(None)));

        let Ok(second) = repo.save(record("Ana")).await else {
            panic!("insert failed");
        };
        assert_eq!(second.id.get(), 2);
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        let repo = Arc::new(InMemoryEnrollmentRepository::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.save(record(&format!("student-{i}"))).await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            let Ok(Ok(saved)) = handle.await else {
                panic!("insert task failed");
            };
            ids.push(saved.id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }
}
