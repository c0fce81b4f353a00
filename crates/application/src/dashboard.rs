use domain::event::EventPublisher;
use domain::form::UniqueIndex;
use domain::record::{
    Decision, District, Employee, Farmer, Mandal, ProcurementBatch, ProcurementCenter, Village,
};
use domain::{
    Clock, DomainError, DomainEvent, EntityKind, ListQuery, LocationIndex, Lookups, OrgChart,
    Record, Result, Submission, TableRow, ValidatedDraft, Wizard,
};
use infrastructure::{BroadcastEventPublisher, CompositeEventPublisher, TracingEventPublisher};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::identity::{FarmerIdGenerator, PrefixedIdGenerator};
use crate::repositories::Repositories;
use crate::service::RecordService;

/// Every mutation the dashboard accepts
#[derive(Debug, Clone)]
pub enum Command {
    /// Create/edit modal save
    Submit {
        kind: EntityKind,
        submission: Submission,
    },
    ToggleStatus {
        kind: EntityKind,
        id: String,
    },
    Decide {
        kind: EntityKind,
        id: String,
        decision: Decision,
    },
    RegisterEmployee(ValidatedDraft),
    RegisterFarmer(ValidatedDraft),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Submit { .. } => "submit",
            Self::ToggleStatus { .. } => "toggle status",
            Self::Decide { .. } => "decide",
            Self::RegisterEmployee(_) => "register employee",
            Self::RegisterFarmer(_) => "register farmer",
        }
    }
}

/// Record count per store, for the landing page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub kind: EntityKind,
    pub total: usize,
    /// Active records, or Pending ones for reviewed entities
    pub open: usize,
}

/// Application controller: owns the entity services and is mutated only
/// through [`Command`]s; views read lists and subscribe to changes.
pub struct Dashboard {
    districts: RecordService<District>,
    mandals: RecordService<Mandal>,
    villages: RecordService<Village>,
    centers: RecordService<ProcurementCenter>,
    employees: RecordService<Employee>,
    farmers: RecordService<Farmer>,
    batches: RecordService<ProcurementBatch>,
    events: BroadcastEventPublisher,
}

impl Dashboard {
    pub fn new(repositories: Repositories, clock: Arc<dyn Clock>, event_buffer: usize) -> Self {
        let events = BroadcastEventPublisher::new(event_buffer);
        let publisher: Arc<dyn EventPublisher> = Arc::new(CompositeEventPublisher::new(vec![
            Arc::new(TracingEventPublisher),
            Arc::new(events.clone()),
        ]));
        Self::with_publisher(repositories, clock, events, publisher)
    }

    /// Wire services to an explicit publisher; `events` still feeds
    /// [`Dashboard::subscribe`]
    pub fn with_publisher(
        repositories: Repositories,
        clock: Arc<dyn Clock>,
        events: BroadcastEventPublisher,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        let farmer_ids = FarmerIdGenerator::new(
            repositories.districts.clone(),
            repositories.mandals.clone(),
            repositories.villages.clone(),
        );

        Self {
            districts: RecordService::new(
                repositories.districts,
                Arc::new(PrefixedIdGenerator::<District>::new("DIST")),
                clock.clone(),
                publisher.clone(),
            ),
            mandals: RecordService::new(
                repositories.mandals,
                Arc::new(PrefixedIdGenerator::<Mandal>::new("MDL")),
                clock.clone(),
                publisher.clone(),
            ),
            villages: RecordService::new(
                repositories.villages,
                Arc::new(PrefixedIdGenerator::<Village>::new("VLG")),
                clock.clone(),
                publisher.clone(),
            ),
            centers: RecordService::new(
                repositories.centers,
                Arc::new(PrefixedIdGenerator::<ProcurementCenter>::new("PC")),
                clock.clone(),
                publisher.clone(),
            ),
            employees: RecordService::new(
                repositories.employees,
                Arc::new(PrefixedIdGenerator::<Employee>::new("EMP")),
                clock.clone(),
                publisher.clone(),
            ),
            farmers: RecordService::new(
                repositories.farmers,
                Arc::new(farmer_ids),
                clock.clone(),
                publisher.clone(),
            ),
            batches: RecordService::new(
                repositories.batches,
                Arc::new(PrefixedIdGenerator::<ProcurementBatch>::new("BATCH")),
                clock,
                publisher,
            ),
            events,
        }
    }

    /// Apply a command and return the affected record as a table row
    pub async fn handle(&self, command: Command) -> Result<TableRow> {
        tracing::debug!(command = command.name(), "Handling command");
        match command {
            Command::Submit { kind, submission } => match kind {
                EntityKind::District => self.row(self.districts.submit(submission).await?).await,
                EntityKind::Mandal => self.row(self.mandals.submit(submission).await?).await,
                EntityKind::Village => self.row(self.villages.submit(submission).await?).await,
                EntityKind::ProcurementCenter => {
                    self.row(self.centers.submit(submission).await?).await
                }
                EntityKind::Employee => self.row(self.employees.submit(submission).await?).await,
                EntityKind::Farmer => self.row(self.farmers.submit(submission).await?).await,
                EntityKind::ProcurementBatch => {
                    self.row(self.batches.submit(submission).await?).await
                }
            },
            Command::ToggleStatus { kind, id } => match kind {
                EntityKind::District => self.row(self.districts.toggle_status(&id).await?).await,
                EntityKind::Mandal => self.row(self.mandals.toggle_status(&id).await?).await,
                EntityKind::Village => self.row(self.villages.toggle_status(&id).await?).await,
                EntityKind::ProcurementCenter => {
                    self.row(self.centers.toggle_status(&id).await?).await
                }
                EntityKind::Employee => self.row(self.employees.toggle_status(&id).await?).await,
                EntityKind::Farmer | EntityKind::ProcurementBatch => {
                    Err(DomainError::Unsupported {
                        kind,
                        command: "toggle status",
                    })
                }
            },
            Command::Decide { kind, id, decision } => match kind {
                EntityKind::Farmer => self.row(self.farmers.decide(&id, decision).await?).await,
                EntityKind::ProcurementBatch => {
                    self.row(self.batches.decide(&id, decision).await?).await
                }
                _ => Err(DomainError::Unsupported {
                    kind,
                    command: "decide",
                }),
            },
            Command::RegisterEmployee(draft) => {
                self.row(self.employees.register(draft).await?).await
            }
            Command::RegisterFarmer(draft) => self.row(self.farmers.register(draft).await?).await,
        }
    }

    /// Receiver of every store change made after this call
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }

    /// Name lookups over every store, built once per listing pass
    pub async fn lookups(&self) -> Result<Lookups> {
        Ok(Lookups::new()
            .with(&self.districts.all().await?)
            .with(&self.mandals.all().await?)
            .with(&self.villages.all().await?)
            .with(&self.centers.all().await?)
            .with(&self.employees.all().await?)
            .with(&self.farmers.all().await?)
            .with(&self.batches.all().await?))
    }

    /// Filtered table rows for one entity page
    pub async fn list(&self, kind: EntityKind, query: &ListQuery) -> Result<Vec<TableRow>> {
        let lookups = self.lookups().await?;
        match kind {
            EntityKind::District => rows(&self.districts, query, &lookups).await,
            EntityKind::Mandal => rows(&self.mandals, query, &lookups).await,
            EntityKind::Village => rows(&self.villages, query, &lookups).await,
            EntityKind::ProcurementCenter => rows(&self.centers, query, &lookups).await,
            EntityKind::Employee => rows(&self.employees, query, &lookups).await,
            EntityKind::Farmer => rows(&self.farmers, query, &lookups).await,
            EntityKind::ProcurementBatch => rows(&self.batches, query, &lookups).await,
        }
    }

    pub async fn org_chart(&self) -> Result<OrgChart> {
        Ok(OrgChart::build(&self.employees.all().await?))
    }

    pub async fn summary(&self) -> Result<Vec<StoreSummary>> {
        Ok(vec![
            summarize(self.districts.all().await?, |d| d.status.is_active()),
            summarize(self.mandals.all().await?, |m| m.status.is_active()),
            summarize(self.villages.all().await?, |v| v.status.is_active()),
            summarize(self.centers.all().await?, |c| c.status.is_active()),
            summarize(self.employees.all().await?, |e| e.status.is_active()),
            summarize(self.farmers.all().await?, |f| f.status.is_pending()),
            summarize(self.batches.all().await?, |b| b.status.is_pending()),
        ])
    }

    pub fn employee_wizard(&self) -> Wizard {
        Wizard::new(Employee::schema())
    }

    pub fn farmer_wizard(&self) -> Wizard {
        Wizard::new(Farmer::schema())
    }

    /// Unique-field index for a wizard or a create form of `kind`
    pub async fn conflicts(&self, kind: EntityKind) -> Result<UniqueIndex> {
        match kind {
            EntityKind::District => self.districts.conflicts(None).await,
            EntityKind::Mandal => self.mandals.conflicts(None).await,
            EntityKind::Village => self.villages.conflicts(None).await,
            EntityKind::ProcurementCenter => self.centers.conflicts(None).await,
            EntityKind::Employee => self.employees.conflicts(None).await,
            EntityKind::Farmer => self.farmers.conflicts(None).await,
            EntityKind::ProcurementBatch => self.batches.conflicts(None).await,
        }
    }

    /// Location hierarchy checked by the farmer wizard
    pub async fn location_rules(&self) -> Result<LocationIndex> {
        Ok(LocationIndex::build(
            &self.districts.all().await?,
            &self.mandals.all().await?,
            &self.villages.all().await?,
        ))
    }

    async fn row<E: Record>(&self, record: E) -> Result<TableRow> {
        let lookups = self.lookups().await?;
        Ok(TableRow::project(&record, &lookups))
    }
}

async fn rows<E: Record>(
    service: &RecordService<E>,
    query: &ListQuery,
    lookups: &Lookups,
) -> Result<Vec<TableRow>> {
    Ok(service
        .list(query, lookups)
        .await?
        .iter()
        .map(|record| TableRow::project(record, lookups))
        .collect())
}

fn summarize<E: Record>(records: Vec<E>, open: impl Fn(&E) -> bool) -> StoreSummary {
    StoreSummary {
        kind: E::KIND,
        total: records.len(),
        open: records.iter().filter(|r| open(r)).count(),
    }
}
