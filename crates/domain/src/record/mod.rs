//! Records held by the entity stores, one module per entity type.

mod batch;
mod center;
mod district;
mod employee;
mod farmer;
mod mandal;
mod repository;
mod status;
mod village;

pub use batch::{BatchGrade, ProcurementBatch};
pub use center::ProcurementCenter;
pub use district::District;
pub use employee::Employee;
pub use farmer::Farmer;
pub use mandal::Mandal;
pub use repository::EntityRepository;
pub use status::{ActiveStatus, ApprovalStatus, Decision};
pub use village::Village;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::DomainError;
use crate::form::{FormSchema, FormValues, ValidationReport};

/// Entity types managed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    District,
    Mandal,
    Village,
    ProcurementCenter,
    Employee,
    Farmer,
    ProcurementBatch,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        Self::District,
        Self::Mandal,
        Self::Village,
        Self::ProcurementCenter,
        Self::Employee,
        Self::Farmer,
        Self::ProcurementBatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::District => "district",
            Self::Mandal => "mandal",
            Self::Village => "village",
            Self::ProcurementCenter => "procurement_center",
            Self::Employee => "employee",
            Self::Farmer => "farmer",
            Self::ProcurementBatch => "procurement_batch",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::District => "District",
            Self::Mandal => "Mandal",
            Self::Village => "Village",
            Self::ProcurementCenter => "Procurement Center",
            Self::Employee => "Employee",
            Self::Farmer => "Farmer",
            Self::ProcurementBatch => "Procurement Batch",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownEntityKind(s.to_string()))
    }
}

/// Which end of the store receives newly created records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Front,
    Back,
}

/// A flat record backing one CRUD page.
///
/// Implementations describe their form through a static [`FormSchema`]; the
/// generic validation, search, and projection code works from that table and
/// from [`Record::field`].
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const KIND: EntityKind;
    const INSERT_POSITION: InsertPosition = InsertPosition::Front;

    fn schema() -> &'static FormSchema;

    fn id(&self) -> &str;

    /// Name shown when another record references this one
    fn display_name(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    #[doc(hidden)]
    fn set_updated_at(&mut self, at: DateTime<Utc>);

    /// Current value of a schema field rendered as text
    fn field(&self, name: &str) -> Option<String>;

    /// Build a new record from values that already passed create validation
    fn create(id: String, values: &FormValues, now: DateTime<Utc>)
    -> Result<Self, ValidationReport>;

    /// Merge the provided values onto this record, leaving timestamps alone
    fn merge(&mut self, values: &FormValues) -> Result<(), ValidationReport>;

    /// Refresh `updated_at`, never moving it backwards
    fn touch(&mut self, now: DateTime<Utc>) {
        let at = now.max(self.updated_at()).max(self.created_at());
        self.set_updated_at(at);
    }
}

/// Records with an Active/Inactive quick action
pub trait Toggleable: Record {
    fn status(&self) -> ActiveStatus;

    fn set_status(&mut self, status: ActiveStatus);

    fn toggle_status(&mut self, now: DateTime<Utc>) {
        self.set_status(self.status().toggled());
        self.touch(now);
    }
}

/// Records that go through Pending -> Approved/Rejected review
pub trait Decidable: Record {
    fn approval(&self) -> ApprovalStatus;

    fn set_approval(&mut self, status: ApprovalStatus);

    fn decide(&mut self, decision: Decision, now: DateTime<Utc>) -> Result<(), DomainError> {
        let current = self.approval();
        let target = decision.target();
        if !current.is_pending() {
            return Err(DomainError::InvalidStatusTransition {
                id: self.id().to_string(),
                from: current.to_string(),
                to: target.to_string(),
            });
        }
        self.set_approval(target);
        self.touch(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_parse() {
        assert_eq!("district".parse::<EntityKind>(), Ok(EntityKind::District));
        assert_eq!(
            "Procurement-Batch".parse::<EntityKind>(),
            Ok(EntityKind::ProcurementBatch)
        );
        assert!(matches!(
            "tractor".parse::<EntityKind>(),
            Err(DomainError::UnknownEntityKind(_))
        ));
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::ProcurementCenter.to_string(), "Procurement Center");
        assert_eq!(EntityKind::Farmer.as_str(), "farmer");
    }
}
