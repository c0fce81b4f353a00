use serde::Serialize;
use std::collections::HashMap;

use crate::form::FieldKind;
use crate::record::{EntityKind, Record};

/// Display text for references that do not resolve
pub const NOT_AVAILABLE: &str = "N/A";

/// Id -> display name map for one entity type, built once per listing pass
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    names: HashMap<String, String>,
}

impl Lookup {
    pub fn from_records<E: Record>(records: &[E]) -> Self {
        Self {
            names: records
                .iter()
                .map(|r| (r.id().to_string(), r.display_name().to_string()))
                .collect(),
        }
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Display name, or `N/A` for a dangling reference
    pub fn resolve(&self, id: &str) -> &str {
        self.name(id).unwrap_or(NOT_AVAILABLE)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Lookups for every entity type a listing may reference
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    by_kind: HashMap<EntityKind, Lookup>,
}

impl Lookups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<E: Record>(mut self, records: &[E]) -> Self {
        self.insert(records);
        self
    }

    pub fn insert<E: Record>(&mut self, records: &[E]) {
        self.by_kind.insert(E::KIND, Lookup::from_records(records));
    }

    pub fn get(&self, kind: EntityKind) -> Option<&Lookup> {
        self.by_kind.get(&kind)
    }

    pub fn name(&self, kind: EntityKind, id: &str) -> Option<&str> {
        self.get(kind).and_then(|lookup| lookup.name(id))
    }

    pub fn resolve(&self, kind: EntityKind, id: &str) -> &str {
        self.name(kind, id).unwrap_or(NOT_AVAILABLE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub field: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// On-screen projection of one record, the same rows an export would use
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<Cell>,
}

impl TableRow {
    pub fn project<E: Record>(record: &E, lookups: &Lookups) -> Self {
        let cells = E::schema()
            .fields
            .iter()
            .map(|field| {
                let raw = record.field(field.name);
                let value = match field.kind {
                    FieldKind::Reference(kind) => raw
                        .as_deref()
                        .map_or(NOT_AVAILABLE, |id| lookups.resolve(kind, id))
                        .to_string(),
                    _ => raw.unwrap_or_default(),
                };
                Cell {
                    field: field.name,
                    label: field.label,
                    value,
                }
            })
            .collect();

        Self {
            id: record.id().to_string(),
            cells,
        }
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.value.as_str())
    }
}
