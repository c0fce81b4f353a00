use super::Record;
use crate::DomainError;
use async_trait::async_trait;

/// Storage contract for one entity store.
///
/// Records are never hard-deleted, so there is no delete operation; retiring
/// a record is a status change followed by [`EntityRepository::update`].
#[async_trait]
pub trait EntityRepository<E: Record>: Send + Sync {
    /// All records in store order
    async fn find_all(&self) -> Result<Vec<E>, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<E>, DomainError>;

    /// Add a new record; fails with `DuplicateId` if the id is taken
    async fn insert(&self, record: E) -> Result<(), DomainError>;

    /// Replace an existing record in place; fails with `NotFound` otherwise
    async fn update(&self, record: E) -> Result<(), DomainError>;

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.find_all().await?.len())
    }
}
