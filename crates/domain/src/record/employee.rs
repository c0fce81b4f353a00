use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActiveStatus, EntityKind, Record, Toggleable};
use crate::form::{FieldDescriptor, FieldKind, FormSchema, FormValues, ValidationReport};

pub const STEP_PERSONAL: usize = 0;
pub const STEP_EMPLOYMENT: usize = 1;
pub const STEP_BANK: usize = 2;

static SCHEMA: FormSchema = FormSchema {
    entity: EntityKind::Employee,
    steps: &["Personal", "Employment", "Bank"],
    fields: &[
        FieldDescriptor::new("name", "Full Name", FieldKind::Text)
            .required()
            .searchable()
            .step(STEP_PERSONAL),
        FieldDescriptor::new("mobile", "Mobile Number", FieldKind::Mobile)
            .required()
            .unique()
            .searchable()
            .step(STEP_PERSONAL),
        FieldDescriptor::new("email", "Email", FieldKind::Email)
            .unique()
            .step(STEP_PERSONAL),
        FieldDescriptor::new("designation", "Designation", FieldKind::Text)
            .required()
            .searchable()
            .step(STEP_EMPLOYMENT),
        FieldDescriptor::new("department", "Department", FieldKind::Text)
            .required()
            .searchable()
            .step(STEP_EMPLOYMENT),
        FieldDescriptor::new(
            "manager_id",
            "Reporting Manager",
            FieldKind::Reference(EntityKind::Employee),
        )
        .step(STEP_EMPLOYMENT),
        FieldDescriptor::new("bank_name", "Bank Name", FieldKind::Text)
            .required()
            .step(STEP_BANK),
        FieldDescriptor::new("account_number", "Account Number", FieldKind::AccountNumber)
            .required()
            .step(STEP_BANK),
        FieldDescriptor::new("ifsc", "IFSC Code", FieldKind::Ifsc)
            .required()
            .step(STEP_BANK),
        FieldDescriptor::new("status", "Status", FieldKind::Select(ActiveStatus::OPTIONS))
            .step(STEP_EMPLOYMENT),
    ],
};

/// Field staff and office employees; `manager_id` builds the org chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    pub designation: String,
    pub department: String,
    #[serde(default)]
    pub manager_id: Option<String>,
    pub bank_name: String,
    pub account_number: String,
    pub ifsc: String,
    #[serde(default)]
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Manager reference, with blank ids treated as none
    pub fn manager(&self) -> Option<&str> {
        self.manager_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

impl Record for Employee {
    const KIND: EntityKind = EntityKind::Employee;

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
            "mobile" => Some(self.mobile.clone()),
            "email" => self.email.clone(),
            "designation" => Some(self.designation.clone()),
            "department" => Some(self.department.clone()),
            "manager_id" => self.manager().map(str::to_string),
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
        let employee = Self {
            id,
            name: reader.text("name"),
            mobile: reader.text("mobile"),
            email: reader.optional_text("email"),
            designation: reader.text("designation"),
            department: reader.text("department"),
            manager_id: reader.optional_text("manager_id"),
            bank_name: reader.text("bank_name"),
            account_number: reader.text("account_number"),
            ifsc: reader.text("ifsc"),
            status: reader.optional_parsed("status").unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        reader.finish()?;
        Ok(employee)
    }

    fn merge(&mut self, values: &FormValues) -> Result<(), ValidationReport> {
        let mut reader = values.reader(&SCHEMA);
        let name = reader.provided_text("name");
        let mobile = reader.provided_text("mobile");
        let email = reader.provided_optional("email");
        let designation = reader.provided_text("designation");
        let department = reader.provided_text("department");
        let manager_id = reader.provided_optional("manager_id");
        let bank_name = reader.provided_text("bank_name");
        let account_number = reader.provided_text("account_number");
        let ifsc = reader.provided_text("ifsc");
        let status = reader.provided_parsed("status");
        reader.finish()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(mobile) = mobile {
            self.mobile = mobile;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(designation) = designation {
            self.designation = designation;
        }
        if let Some(department) = department {
            self.department = department;
        }
        if let Some(manager_id) = manager_id {
            self.manager_id = manager_id;
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
        if let Some(status) = status {
            self.status = status;
        }
        Ok(())
    }
}

impl Toggleable for Employee {
    fn status(&self) -> ActiveStatus {
        self.status
    }

    fn set_status(&mut self, status: ActiveStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn values() -> FormValues {
        FormValues::new()
            .with("name", "Lakshmi Devi")
            .with("mobile", "9876501234")
            .with("designation", "Field Officer")
            .with("department", "Extension")
            .with("manager_id", "  ")
            .with("bank_name", "State Bank of India")
            .with("account_number", "123456789012")
            .with("ifsc", "SBIN0001234")
    }

    #[test]
    fn test_blank_manager_is_none() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let employee = Employee::create("EMP1".into(), &values(), now).unwrap();
        assert_eq!(employee.manager(), None);
        assert_eq!(employee.field("manager_id"), None);
    }

    #[test]
    fn test_merge_can_clear_optional_email() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut employee =
            Employee::create("EMP1".into(), &values().with("email", "l@palmco.in"), now).unwrap();
        assert_eq!(employee.email.as_deref(), Some("l@palmco.in"));

        employee
            .merge(&FormValues::new().with("email", "").with("manager_id", "EMP0"))
            .unwrap();
        assert_eq!(employee.email, None);
        assert_eq!(employee.manager(), Some("EMP0"));
    }

    #[test]
    fn test_schema_steps() {
        let schema = Employee::schema();
        assert_eq!(schema.steps.len(), 3);
        assert_eq!(schema.step_of("ifsc"), Some(STEP_BANK));
        assert_eq!(schema.step_fields(STEP_PERSONAL).count(), 3);
    }
}
