use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActiveStatus, EntityKind, Record, Toggleable};
use crate::form::{FieldDescriptor, FieldKind, FormSchema, FormValues, ValidationReport};

static SCHEMA: FormSchema = FormSchema {
    entity: EntityKind::Mandal,
    steps: &["Mandal"],
    fields: &[
        FieldDescriptor::new("name", "Mandal Name", FieldKind::Text)
            .required()
            .searchable(),
        FieldDescriptor::new("code", "Mandal Code", FieldKind::Number)
            .required()
            .searchable(),
        FieldDescriptor::new(
            "district_id",
            "District",
            FieldKind::Reference(EntityKind::District),
        )
        .required()
        .searchable(),
        FieldDescriptor::new("status", "Status", FieldKind::Select(ActiveStatus::OPTIONS)),
    ],
};

/// Master-data mandal, a subdivision of a district
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mandal {
    pub id: String,
    pub name: String,
    pub code: u32,
    pub district_id: String,
    #[serde(default)]
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Mandal {
    const KIND: EntityKind = EntityKind::Mandal;

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
            "code" => Some(self.code.to_string()),
            "district_id" => Some(self.district_id.clone()),
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
        let code = reader.parsed("code");
        let district_id = reader.text("district_id");
        let status = reader.optional_parsed("status").unwrap_or_default();
        reader.finish()?;

        Ok(Self {
            id,
            name,
            code,
            district_id,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    fn merge(&mut self, values: &FormValues) -> Result<(), ValidationReport> {
        let mut reader = values.reader(&SCHEMA);
        let name = reader.provided_text("name");
        let code = reader.provided_parsed("code");
        let district_id = reader.provided_text("district_id");
        let status = reader.provided_parsed("status");
        reader.finish()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(code) = code {
            self.code = code;
        }
        if let Some(district_id) = district_id {
            self.district_id = district_id;
        }
        if let Some(status) = status {
            self.status = status;
        }
        Ok(())
    }
}

impl Toggleable for Mandal {
    fn status(&self) -> ActiveStatus {
        self.status
    }

    fn set_status(&mut self, status: ActiveStatus) {
        self.status = status;
    }
}
