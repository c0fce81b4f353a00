//! Domain layer - Pure business logic for the operations dashboard
//!
//! This crate contains:
//! - Records (District, Mandal, Village, ProcurementCenter, Employee, Farmer, ProcurementBatch)
//! - Field-descriptor forms and their validation rules
//! - List queries: search, filters, lookups, highlighting
//! - Value objects (FarmerId, statuses)
//! - The org chart, the registration wizard and the location hierarchy
//! - Domain Events
//! - Repository, clock and publisher interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Every entity goes through the same generic CRUD pattern
//! - Testable in isolation

pub mod clock;
pub mod error;
pub mod event;
pub mod farmer_id;
pub mod form;
pub mod location;
pub mod org_chart;
pub mod query;
pub mod record;
pub mod wizard;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use error::{DomainError, Result};
pub use event::DomainEvent;
pub use farmer_id::{FarmerId, LocationCodes};
pub use form::{FormValues, Submission, ValidationReport};
pub use location::LocationIndex;
pub use org_chart::{OrgChart, OrgChartView, OrgNode};
pub use query::{ListQuery, Lookups, TableRow};
pub use record::{EntityKind, Record};
pub use wizard::{ValidatedDraft, Wizard};
