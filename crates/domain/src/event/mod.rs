use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod publisher;
pub use publisher::{EventPublisher, PublishError};

use crate::record::EntityKind;

/// Store mutations that views subscribe to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    /// A record was added through a create form or wizard
    RecordCreated {
        kind: EntityKind,
        record_id: String,
        timestamp: DateTime<Utc>,
    },

    /// An edit modal merged new values into a record
    RecordUpdated {
        kind: EntityKind,
        record_id: String,
        timestamp: DateTime<Utc>,
    },

    /// A quick action changed the record's lifecycle status
    StatusChanged {
        kind: EntityKind,
        record_id: String,
        status: String,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent {
    pub fn record_created(kind: EntityKind, record_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::RecordCreated {
            kind,
            record_id: record_id.into(),
            timestamp: at,
        }
    }

    pub fn record_updated(kind: EntityKind, record_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::RecordUpdated {
            kind,
            record_id: record_id.into(),
            timestamp: at,
        }
    }

    pub fn status_changed(
        kind: EntityKind,
        record_id: impl Into<String>,
        status: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self::StatusChanged {
            kind,
            record_id: record_id.into(),
            status: status.into(),
            timestamp: at,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::RecordCreated { kind, .. } => *kind,
            Self::RecordUpdated { kind, .. } => *kind,
            Self::StatusChanged { kind, .. } => *kind,
        }
    }

    pub fn record_id(&self) -> &str {
        match self {
            Self::RecordCreated { record_id, .. } => record_id,
            Self::RecordUpdated { record_id, .. } => record_id,
            Self::StatusChanged { record_id, .. } => record_id,
        }
    }

    /// Get the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::RecordCreated { timestamp, .. } => *timestamp,
            Self::RecordUpdated { timestamp, .. } => *timestamp,
            Self::StatusChanged { timestamp, .. } => *timestamp,
        }
    }

    /// Get the event type as string
    pub fn event_type(&self) -> &str {
        match self {
            Self::RecordCreated { .. } => "RecordCreated",
            Self::RecordUpdated { .. } => "RecordUpdated",
            Self::StatusChanged { .. } => "StatusChanged",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_changed_event() {
        let at = Utc::now();
        let event = DomainEvent::status_changed(EntityKind::District, "D1", "Inactive", at);

        assert_eq!(event.event_type(), "StatusChanged");
        assert_eq!(event.kind(), EntityKind::District);
        assert_eq!(event.record_id(), "D1");
        assert_eq!(event.timestamp(), at);
        match event {
            DomainEvent::StatusChanged { status, .. } => assert_eq!(status, "Inactive"),
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn test_event_serialization() {
        let event = DomainEvent::record_created(EntityKind::Farmer, "07-01-001-24-0001", Utc::now());

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "RecordCreated");
        assert_eq!(json["kind"], "farmer");

        let back: DomainEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
