use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApprovalStatus, Decidable, EntityKind, Record};
use crate::form::{FieldDescriptor, FieldKind, FormSchema, FormValues, ValidationReport};

pub const STEP_PERSONAL: usize = 0;
pub const STEP_LOCATION: usize = 1;
pub const STEP_LAND: usize = 2;
pub const STEP_BANK: usize = 3;

static SCHEMA: FormSchema = FormSchema {
    entity: EntityKind::Farmer,
    steps: &["Personal", "Location", "Land", "Bank"],
    fields: &[
        FieldDescriptor::new("name", "Farmer Name", FieldKind::Text)
            .required()
            .searchable()
            .step(STEP_PERSONAL),
        FieldDescriptor::new("father_name", "Father / Spouse Name", FieldKind::Text)
            .required()
            .step(STEP_PERSONAL),
        FieldDescriptor::new("mobile", "Mobile Number", FieldKind::Mobile)
            .required()
            .unique()
            .searchable()
            .step(STEP_PERSONAL),
        FieldDescriptor::new("aadhaar", "Aadhaar Number", FieldKind::Aadhaar)
            .required()
            .unique()
            .step(STEP_PERSONAL),
        FieldDescriptor::new(
            "district_id",
            "District",
            FieldKind::Reference(EntityKind::District),
        )
        .required()
        .searchable()
        .step(STEP_LOCATION),
        FieldDescriptor::new("mandal_id", "Mandal", FieldKind::Reference(EntityKind::Mandal))
            .required()
            .searchable()
            .step(STEP_LOCATION),
        FieldDescriptor::new(
            "village_id",
            "Village",
            FieldKind::Reference(EntityKind::Village),
        )
        .required()
        .searchable()
        .step(STEP_LOCATION),
        FieldDescriptor::new("land_acres", "Land Holding (acres)", FieldKind::Decimal)
            .required()
            .step(STEP_LAND),
        FieldDescriptor::new(
            "assigned_agent_id",
            "Field Agent",
            FieldKind::Reference(EntityKind::Employee),
        )
        .searchable()
        .step(STEP_LAND),
        FieldDescriptor::new("bank_name", "Bank Name", FieldKind::Text)
            .required()
            .step(STEP_BANK),
        FieldDescriptor::new("account_number", "Account Number", FieldKind::AccountNumber)
            .required()
            .step(STEP_BANK),
        FieldDescriptor::new("ifsc", "IFSC Code", FieldKind::Ifsc)
            .required()
            .step(STEP_BANK),
        FieldDescriptor::new(
            "status",
            "Status",
            FieldKind::Select(ApprovalStatus::OPTIONS),
        )
        .read_only(),
    ],
};

/// Registered oil-palm grower. The id is the composite code built by
/// [`crate::FarmerId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub id: String,
    pub name: String,
    pub father_name: String,
    pub mobile: String,
    pub aadhaar: String,
    pub district_id: String,
    pub mandal_id: String,
    pub village_id: String,
    pub land_acres: f64,
    #[serde(default)]
    pub assigned_agent_id: Option<String>,
    pub bank_name: String,
    pub account_number: String,
    pub ifsc: String,
    #[serde(default)]
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Farmer {
    const KIND: EntityKind = EntityKind::Farmer;

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
            "father_name" => Some(self.father_name.clone()),
            "mobile" => Some(self.mobile.clone()),
            "aadhaar" => Some(self.aadhaar.clone()),
            "district_id" => Some(self.district_id.clone()),
            "mandal_id" => Some(self.mandal_id.clone()),
            "village_id" => Some(self.village_id.clone()),
            "land_acres" => Some(self.land_acres.to_string()),
            "assigned_agent_id" => self.assigned_agent_id.clone(),
            "bank_name" => Some(self.bank_name.clone()),
            "account_number" => Some(self.account_number.clone()),
            "ifsc" => Some(self.ifsc.clone()),
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
        let farmer = Self {
            id,
            name: reader.text("name"),
            father_name: reader.text("father_name"),
            mobile: reader.text("mobile"),
            aadhaar: reader.text("aadhaar"),
            district_id: reader.text("district_id"),
            mandal_id: reader.text("mandal_id"),
            village_id: reader.text("village_id"),
            land_acres: reader.parsed("land_acres"),
            assigned_agent_id: reader.optional_text("assigned_agent_id"),
            bank_name: reader.text("bank_name"),
            account_number: reader.text("account_number"),
            ifsc: reader.text("ifsc"),
            status: ApprovalStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        reader.finish()?;
        Ok(farmer)
    }

    fn merge(&mut self, values: &FormValues) -> Result<(), ValidationReport> {
        let mut reader = values.reader(&SCHEMA);
        let name = reader.provided_text("name");
        let father_name = reader.provided_text("father_name");
        let mobile = reader.provided_text("mobile");
        let aadhaar = reader.provided_text("aadhaar");
        let district_id = reader.provided_text("district_id");
        let mandal_id = reader.provided_text("mandal_id");
        let village_id = reader.provided_text("village_id");
        let land_acres = reader.provided_parsed("land_acres");
        let assigned_agent_id = reader.provided_optional("assigned_agent_id");
        let bank_name = reader.provided_text("bank_name");
        let account_number = reader.provided_text("account_number");
        let ifsc = reader.provided_text("ifsc");
        reader.finish()?;

        // The id keeps the location it was registered under
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(father_name) = father_name {
            self.father_name = father_name;
        }
        if let Some(mobile) = mobile {
            self.mobile = mobile;
        }
        if let Some(aadhaar) = aadhaar {
            self.aadhaar = aadhaar;
        }
        if let Some(district_id) = district_id {
            self.district_id = district_id;
        }
        if let Some(mandal_id) = mandal_id {
            self.mandal_id = mandal_id;
        }
        if let Some(village_id) = village_id {
            self.village_id = village_id;
        }
        if let Some(land_acres) = land_acres {
            self.land_acres = land_acres;
        }
        if let Some(assigned_agent_id) = assigned_agent_id {
            self.assigned_agent_id = assigned_agent_id;
        }
        if let Some(bank_name) = bank_name {
            self.bank_name = bank_name;
        }
        if let Some(account_number) = account_number {
            self.account_number = account_number;
        }
        if let Some(ifsc) = ifsc {
            self.ifsc = ifsc;
        }
        Ok(())
    }
}

impl Decidable for Farmer {
    fn approval(&self) -> ApprovalStatus {
        self.status
    }

    fn set_approval(&mut self, status: ApprovalStatus) {
        self.status = status;
    }
}
