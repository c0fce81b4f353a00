use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{ApprovalStatus, Decidable, EntityKind, InsertPosition, Record};
use crate::form::{FieldDescriptor, FieldKind, FormSchema, FormValues, ValidationReport};

/// Fresh-fruit-bunch quality grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BatchGrade {
    #[default]
    A,
    B,
    C,
}

impl BatchGrade {
    pub const OPTIONS: &'static [&'static str] = &["A", "B", "C"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl std::fmt::Display for BatchGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            other => Err(format!("unknown grade '{other}'")),
        }
    }
}

static SCHEMA: FormSchema = FormSchema {
    entity: EntityKind::ProcurementBatch,
    steps: &["Batch"],
    fields: &[
        FieldDescriptor::new("farmer_id", "Farmer", FieldKind::Reference(EntityKind::Farmer))
            .required()
            .searchable(),
        FieldDescriptor::new(
            "center_id",
            "Procurement Center",
            FieldKind::Reference(EntityKind::ProcurementCenter),
        )
        .required()
        .searchable(),
        FieldDescriptor::new("weight_kg", "Net Weight (kg)", FieldKind::Decimal).required(),
        FieldDescriptor::new("grade", "Grade", FieldKind::Select(BatchGrade::OPTIONS)).required(),
        FieldDescriptor::new(
            "status",
            "Status",
            FieldKind::Select(ApprovalStatus::OPTIONS),
        )
        .read_only(),
    ],
};

/// One delivery of fruit by a farmer at a procurement center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementBatch {
    pub id: String,
    pub farmer_id: String,
    pub center_id: String,
    pub weight_kg: f64,
    pub grade: BatchGrade,
    #[serde(default)]
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for ProcurementBatch {
    const KIND: EntityKind = EntityKind::ProcurementBatch;
    const INSERT_POSITION: InsertPosition = InsertPosition::Back;

    fn schema() -> &'static FormSchema {
        &SCHEMA
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.id
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
            "farmer_id" => Some(self.farmer_id.clone()),
            "center_id" => Some(self.center_id.clone()),
            "weight_kg" => Some(self.weight_kg.to_string()),
            "grade" => Some(self.grade.to_string()),
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
        let batch = Self {
            id,
            farmer_id: reader.text("farmer_id"),
            center_id: reader.text("center_id"),
            weight_kg: reader.parsed("weight_kg"),
            grade: reader.parsed("grade"),
            status: ApprovalStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        reader.finish()?;
        Ok(batch)
    }

    fn merge(&mut self, values: &FormValues) -> Result<(), ValidationReport> {
        let mut reader = values.reader(&SCHEMA);
        let farmer_id = reader.provided_text("farmer_id");
        let center_id = reader.provided_text("center_id");
        let weight_kg = reader.provided_parsed("weight_kg");
        let grade = reader.provided_parsed("grade");
        reader.finish()?;

        if let Some(farmer_id) = farmer_id {
            self.farmer_id = farmer_id;
        }
        if let Some(center_id) = center_id {
            self.center_id = center_id;
        }
        if let Some(weight_kg) = weight_kg {
            self.weight_kg = weight_kg;
        }
        if let Some(grade) = grade {
            self.grade = grade;
        }
        Ok(())
    }
}

impl Decidable for ProcurementBatch {
    fn approval(&self) -> ApprovalStatus {
        self.status
    }

    fn set_approval(&mut self, status: ApprovalStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_create_batch_parses_grade_case_insensitively() {
        let now = Utc.with_ymd_and_hms(2024, 7, 2, 6, 0, 0).unwrap();
        let values = FormValues::new()
            .with("farmer_id", "04-02-012-24-0001")
            .with("center_id", "PC1")
            .with("weight_kg", "1250.5")
            .with("grade", "b");
        let batch = ProcurementBatch::create("BATCH1".into(), &values, now).unwrap();
        assert_eq!(batch.grade, BatchGrade::B);
        assert_eq!(batch.weight_kg, 1250.5);
        assert!(batch.status.is_pending());
    }

    #[test]
    fn test_grade_round_trip() {
        for option in BatchGrade::OPTIONS {
            let grade: BatchGrade = option.parse().unwrap();
            assert_eq!(grade.as_str(), *option);
        }
    }
}
