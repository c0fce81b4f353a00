use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActiveStatus, EntityKind, InsertPosition, Record, Toggleable};
use crate::form::{FieldDescriptor, FieldKind, FormSchema, FormValues, ValidationReport};

static SCHEMA: FormSchema = FormSchema {
    entity: EntityKind::ProcurementCenter,
    steps: &["Center"],
    fields: &[
        FieldDescriptor::new("name", "Center Name", FieldKind::Text)
            .required()
            .searchable(),
        FieldDescriptor::new(
            "district_id",
            "District",
            FieldKind::Reference(EntityKind::District),
        )
        .required()
        .searchable(),
        FieldDescriptor::new("capacity_tonnes", "Capacity (t)", FieldKind::Decimal).required(),
        FieldDescriptor::new("status", "Status", FieldKind::Select(ActiveStatus::OPTIONS)),
    ],
};

/// Collection point where farmers deliver fresh fruit bunches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementCenter {
    pub id: String,
    pub name: String,
    pub district_id: String,
    pub capacity_tonnes: f64,
    #[serde(default)]
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for ProcurementCenter {
    const KIND: EntityKind = EntityKind::ProcurementCenter;
    const INSERT_POSITION: InsertPosition = InsertPosition::Back;

    fn schema() -> &'static FormSchema {
        &SCHEMA
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "district_id" => Some(self.district_id.clone()),
            "capacity_tonnes" => Some(self.capacity_tonnes.to_string()),
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }

    fn create(
        id: String,
        values: &FormValues,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationReport> {
        let mut reader = values.reader(&SCHEMA);
        let name = reader.text("name");
        let district_id = reader.text("district_id");
        let capacity_tonnes = reader.parsed("capacity_tonnes");
        let status = reader.optional_parsed("status").unwrap_or_default();
        reader.finish()?;

        Ok(Self {
            id,
            name,
            district_id,
            capacity_tonnes,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    fn merge(&mut self, values: &FormValues) -> Result<(), ValidationReport> {
        let mut reader = values.reader(&SCHEMA);
        let name = reader.provided_text("name");
        let district_id = reader.provided_text("district_id");
        let capacity_tonnes = reader.provided_parsed("capacity_tonnes");
        let status = reader.provided_parsed("status");
        reader.finish()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(district_id) = district_id {
            self.district_id = district_id;
        }
        if let Some(capacity_tonnes) = capacity_tonnes {
            self.capacity_tonnes = capacity_tonnes;
        }
        if let Some(status) = status {
            self.status = status;
        }
        Ok(())
    }
}

impl Toggleable for ProcurementCenter {
    fn status(&self) -> ActiveStatus {
        self.status
    }

    fn set_status(&mut self, status: ActiveStatus) {
        self.status = status;
    }
}
