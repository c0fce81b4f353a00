use async_trait::async_trait;
use domain::record::{EntityRepository, InsertPosition};
use domain::{DomainError, Record};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Session-scoped store for one entity type.
///
/// Record order is the store order shown by list pages: new records go to
/// the end named by [`Record::INSERT_POSITION`], edits stay in place.
#[derive(Clone)]
pub struct InMemoryRepository<E: Record> {
    records: Arc<RwLock<Vec<E>>>,
}

impl<E: Record> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Seed the store; records keep the given order and ids must be unique
    pub fn with_records(records: Vec<E>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        if let Some(repeated) = records.iter().find(|r| !seen.insert(r.id())) {
            return Err(DomainError::DuplicateId {
                kind: E::KIND,
                id: repeated.id().to_string(),
            });
        }

        tracing::debug!(kind = E::KIND.as_str(), count = records.len(), "Seeded store");
        Ok(Self {
            records: Arc::new(RwLock::new(records)),
        })
    }
}

impl<E: Record> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Record> EntityRepository<E> for InMemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<E>, DomainError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, record: E) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(DomainError::DuplicateId {
                kind: E::KIND,
                id: record.id().to_string(),
            });
        }

        tracing::debug!(kind = E::KIND.as_str(), id = record.id(), "Inserting record");
        match E::INSERT_POSITION {
            InsertPosition::Front => records.insert(0, record),
            InsertPosition::Back => records.push(record),
        }
        Ok(())
    }

    async fn update(&self, record: E) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| DomainError::NotFound {
                kind: E::KIND,
                id: record.id().to_string(),
            })?;

        tracing::debug!(kind = E::KIND.as_str(), id = record.id(), "Updating record");
        *slot = record;
        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.records.read().await.len())
    }
}
