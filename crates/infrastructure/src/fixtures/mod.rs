//! Seed data for the entity stores.
//!
//! The bundled set is compiled in from `fixtures/*.json`; a directory with
//! the same file names can replace it at startup.

use domain::record::{
    District, Employee, Farmer, Mandal, ProcurementBatch, ProcurementCenter, Village,
};
use domain::{DomainError, EntityKind, Record};
use std::collections::HashSet;
use std::path::Path;

const DISTRICTS: &str = include_str!("../../fixtures/district.json");
const MANDALS: &str = include_str!("../../fixtures/mandal.json");
const VILLAGES: &str = include_str!("../../fixtures/village.json");
const CENTERS: &str = include_str!("../../fixtures/procurement_center.json");
const EMPLOYEES: &str = include_str!("../../fixtures/employee.json");
const FARMERS: &str = include_str!("../../fixtures/farmer.json");
const BATCHES: &str = include_str!("../../fixtures/procurement_batch.json");

/// Initial contents of every store
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub districts: Vec<District>,
    pub mandals: Vec<Mandal>,
    pub villages: Vec<Village>,
    pub centers: Vec<ProcurementCenter>,
    pub employees: Vec<Employee>,
    pub farmers: Vec<Farmer>,
    pub batches: Vec<ProcurementBatch>,
}

impl SeedData {
    /// Fixtures shipped with the binary
    pub fn bundled() -> Result<Self, DomainError> {
        Ok(Self {
            districts: parse(DISTRICTS)?,
            mandals: parse(MANDALS)?,
            villages: parse(VILLAGES)?,
            centers: parse(CENTERS)?,
            employees: parse(EMPLOYEES)?,
            farmers: parse(FARMERS)?,
            batches: parse(BATCHES)?,
        })
    }

    /// Load `<kind>.json` for each store from `dir`.
    ///
    /// A missing file leaves that store empty; a malformed one is an error.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let dir = dir.as_ref();
        tracing::info!("Loading fixtures from {}", dir.display());
        Ok(Self {
            districts: read(dir)?,
            mandals: read(dir)?,
            villages: read(dir)?,
            centers: read(dir)?,
            employees: read(dir)?,
            farmers: read(dir)?,
            batches: read(dir)?,
        })
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::District => self.districts.len(),
            EntityKind::Mandal => self.mandals.len(),
            EntityKind::Village => self.villages.len(),
            EntityKind::ProcurementCenter => self.centers.len(),
            EntityKind::Employee => self.employees.len(),
            EntityKind::Farmer => self.farmers.len(),
            EntityKind::ProcurementBatch => self.batches.len(),
        }
    }
}

fn parse<E: Record>(json: &str) -> Result<Vec<E>, DomainError> {
    let records: Vec<E> = serde_json::from_str(json)
        .map_err(|e| DomainError::Fixture(format!("{} fixtures: {}", E::KIND.as_str(), e)))?;

    let mut seen = HashSet::new();
    if let Some(repeated) = records.iter().find(|r| !seen.insert(r.id())) {
        return Err(DomainError::Fixture(format!(
            "{} fixtures: duplicate id {}",
            E::KIND.as_str(),
            repeated.id()
        )));
    }
    Ok(records)
}

fn read<E: Record>(dir: &Path) -> Result<Vec<E>, DomainError> {
    let path = dir.join(format!("{}.json", E::KIND.as_str()));
    if !path.exists() {
        tracing::warn!("No fixture file at {}, starting empty", path.display());
        return Ok(Vec::new());
    }
    let json = std::fs::read_to_string(&path)
        .map_err(|e| DomainError::Fixture(format!("{}: {}", path.display(), e)))?;
    parse(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_fixtures_parse() {
        let seed = SeedData::bundled().unwrap();
        for kind in EntityKind::ALL {
            assert!(seed.count(kind) > 0, "{kind} fixtures are empty");
        }
    }

    #[test]
    fn test_parse_rejects_repeated_id() {
        let json = r#"[
            { "id": "PC1", "name": "Sathupalli Yard", "districtId": "D2", "capacityTonnes": 120.0,
              "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z" },
            { "id": "PC1", "name": "Eluru Yard", "districtId": "D3", "capacityTonnes": 85.5,
              "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z" }
        ]"#;

        match parse::<ProcurementCenter>(json) {
            Err(DomainError::Fixture(message)) => {
                assert_eq!(message, "procurement_center fixtures: duplicate id PC1")
            }
            other => panic!("expected fixture error, got {other:?}"),
        }
    }
}
