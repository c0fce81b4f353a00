use thiserror::Error;

use crate::form::ValidationReport;
use crate::record::EntityKind;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} with id {id} already exists")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("Invalid status transition for {id}: {from} -> {to}")]
    InvalidStatusTransition {
        id: String,
        from: String,
        to: String,
    },

    #[error("{command} is not available for {kind}")]
    Unsupported {
        kind: EntityKind,
        command: &'static str,
    },

    #[error("A {found} form cannot register a {expected}")]
    SchemaMismatch {
        expected: EntityKind,
        found: EntityKind,
    },

    #[error("Invalid farmer ID: {0}")]
    InvalidFarmerId(String),

    #[error("Unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<ValidationReport> for DomainError {
    fn from(report: ValidationReport) -> Self {
        Self::Validation(report)
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
