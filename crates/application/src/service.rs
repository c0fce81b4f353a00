use domain::event::EventPublisher;
use domain::form::{UniqueIndex, ValidationScope};
use domain::record::{Decidable, Decision, EntityRepository, Toggleable};
use domain::{
    Clock, DomainError, DomainEvent, FormValues, ListQuery, Lookups, Record, Result, Submission,
    ValidatedDraft,
};
use std::sync::Arc;

use crate::identity::IdGenerator;

/// CRUD use cases shared by every entity page
pub struct RecordService<E: Record> {
    repository: Arc<dyn EntityRepository<E>>,
    ids: Arc<dyn IdGenerator<E>>,
    clock: Arc<dyn Clock>,
    publisher: Arc<dyn EventPublisher>,
}

impl<E: Record> RecordService<E> {
    pub fn new(
        repository: Arc<dyn EntityRepository<E>>,
        ids: Arc<dyn IdGenerator<E>>,
        clock: Arc<dyn Clock>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            ids,
            clock,
            publisher,
        }
    }

    pub async fn all(&self) -> Result<Vec<E>> {
        self.repository.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<E> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                kind: E::KIND,
                id: id.to_string(),
            })
    }

    /// Records matching `query`, in store order
    pub async fn list(&self, query: &ListQuery, lookups: &Lookups) -> Result<Vec<E>> {
        let records = self.all().await?;
        Ok(query.apply(&records, lookups).into_iter().cloned().collect())
    }

    /// Unique-field index for a form editing `exclude`, or a new record
    pub async fn conflicts(&self, exclude: Option<&str>) -> Result<UniqueIndex> {
        Ok(UniqueIndex::build(&self.all().await?, exclude))
    }

    /// Modal save: create when the submission has no id, edit otherwise
    pub async fn submit(&self, submission: Submission) -> Result<E> {
        match submission.id {
            None => self.create(&submission.values).await,
            Some(id) => self.edit(&id, &submission.values).await,
        }
    }

    /// Create a record from a finished wizard.
    ///
    /// Uniqueness is checked again since the store may have changed while
    /// the wizard was open.
    pub async fn register(&self, draft: ValidatedDraft) -> Result<E> {
        if draft.entity() != E::KIND {
            return Err(DomainError::SchemaMismatch {
                expected: E::KIND,
                found: draft.entity(),
            });
        }
        self.create(draft.values()).await
    }

    async fn create(&self, values: &FormValues) -> Result<E> {
        let records = self.all().await?;
        let index = UniqueIndex::build(&records, None);
        E::schema().validate(values, ValidationScope::Create, &index)?;

        let now = self.clock.now();
        let id = self.ids.next_id(values, &records, now).await?;
        let record = E::create(id, values, now)?;
        self.repository.insert(record.clone()).await?;

        tracing::info!(kind = E::KIND.as_str(), record_id = record.id(), "Record created");
        self.notify(DomainEvent::record_created(E::KIND, record.id(), now))
            .await;
        Ok(record)
    }

    async fn edit(&self, id: &str, values: &FormValues) -> Result<E> {
        let mut record = self.get(id).await?;
        let index = self.conflicts(Some(id)).await?;
        E::schema().validate(values, ValidationScope::Update, &index)?;

        record.merge(values)?;
        let now = self.clock.now();
        record.touch(now);
        self.repository.update(record.clone()).await?;

        tracing::info!(kind = E::KIND.as_str(), record_id = id, "Record updated");
        self.notify(DomainEvent::record_updated(E::KIND, id, now))
            .await;
        Ok(record)
    }

    async fn notify(&self, event: DomainEvent) {
        if let Err(e) = self.publisher.publish(event).await {
            tracing::warn!("Store change was not published: {}", e);
        }
    }
}

impl<E: Toggleable> RecordService<E> {
    /// Flip Active/Inactive; related records are left alone
    pub async fn toggle_status(&self, id: &str) -> Result<E> {
        let mut record = self.get(id).await?;
        let now = self.clock.now();
        record.toggle_status(now);
        self.repository.update(record.clone()).await?;

        let status = record.status();
        tracing::info!(kind = E::KIND.as_str(), record_id = id, %status, "Status toggled");
        self.notify(DomainEvent::status_changed(E::KIND, id, status.as_str(), now))
            .await;
        Ok(record)
    }
}

impl<E: Decidable> RecordService<E> {
    pub async fn decide(&self, id: &str, decision: Decision) -> Result<E> {
        let mut record = self.get(id).await?;
        let now = self.clock.now();
        record.decide(decision, now)?;
        self.repository.update(record.clone()).await?;

        let status = record.approval();
        tracing::info!(kind = E::KIND.as_str(), record_id = id, %status, "Review decided");
        self.notify(DomainEvent::status_changed(E::KIND, id, status.as_str(), now))
            .await;
        Ok(record)
    }
}
