use std::collections::HashMap;

use crate::farmer_id::LocationCodes;
use crate::form::{
    ErrorKind, FieldDescriptor, FieldKind, FormValues, RecordRules, ValidationReport,
};
use crate::record::{District, Farmer, Mandal, Record, Village};
use crate::Result;

/// Snapshot of the district > mandal > village hierarchy a farmer is
/// registered under.
///
/// Checks `district_id`, `mandal_id` and `village_id` of farmer form values:
/// each must exist and belong to the parent selected on the same form.
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    districts: HashMap<String, u32>,
    mandals: HashMap<String, (String, u32)>,
    villages: HashMap<String, (String, u32)>,
}

impl LocationIndex {
    pub fn build(districts: &[District], mandals: &[Mandal], villages: &[Village]) -> Self {
        Self {
            districts: districts.iter().map(|d| (d.id.clone(), d.code)).collect(),
            mandals: mandals
                .iter()
                .map(|m| (m.id.clone(), (m.district_id.clone(), m.code)))
                .collect(),
            villages: villages
                .iter()
                .map(|v| (v.id.clone(), (v.mandal_id.clone(), v.code)))
                .collect(),
        }
    }

    /// Codes of a complete, consistent location
    pub fn resolve(&self, values: &FormValues) -> Result<LocationCodes> {
        let report = self.check(values);
        if !report.is_empty() {
            return Err(report.into());
        }

        let district = values.get("district_id").and_then(|id| self.districts.get(id));
        let mandal = values.get("mandal_id").and_then(|id| self.mandals.get(id));
        let village = values.get("village_id").and_then(|id| self.villages.get(id));
        match (district, mandal, village) {
            (Some(district), Some((_, mandal)), Some((_, village))) => {
                LocationCodes::new(*district, *mandal, *village)
            }
            (None, _, _) => Err(missing("district_id").into()),
            (_, None, _) => Err(missing("mandal_id").into()),
            (_, _, None) => Err(missing("village_id").into()),
        }
    }
}

impl RecordRules for LocationIndex {
    fn check(&self, values: &FormValues) -> ValidationReport {
        let mut report = ValidationReport::new();
        // Parents that do not exist are reported once, not again on their children
        let district = values.get("district_id");
        let known_district = district.filter(|id| self.districts.contains_key(*id));
        if district.is_some() && known_district.is_none() {
            mismatch(&mut report, "district_id", "District does not exist");
        }

        let mandal = values.get("mandal_id");
        let known_mandal = mandal.filter(|id| self.mandals.contains_key(*id));
        if let Some(id) = mandal {
            match self.mandals.get(id) {
                None => mismatch(&mut report, "mandal_id", "Mandal does not exist"),
                Some((parent, _)) if known_district.is_some_and(|d| d != parent.as_str()) => {
                    mismatch(&mut report, "mandal_id", "Mandal is not in the selected district")
                }
                Some(_) => {}
            }
        }

        if let Some(id) = values.get("village_id") {
            match self.villages.get(id) {
                None => mismatch(&mut report, "village_id", "Village does not exist"),
                Some((parent, _)) if known_mandal.is_some_and(|m| m != parent.as_str()) => {
                    mismatch(&mut report, "village_id", "Village is not in the selected mandal")
                }
                Some(_) => {}
            }
        }

        report
    }
}

fn mismatch(report: &mut ValidationReport, name: &'static str, message: &str) {
    report.add(&descriptor(name), ErrorKind::Format, message);
}

fn descriptor(name: &'static str) -> FieldDescriptor {
    Farmer::schema()
        .field(name)
        .copied()
        .unwrap_or_else(|| FieldDescriptor::new(name, name, FieldKind::Text))
}

fn missing(name: &'static str) -> ValidationReport {
    let field = descriptor(name);
    ValidationReport::single(&field, ErrorKind::Missing, format!("{} is required", field.label))
}
