use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{FieldDescriptor, FormSchema, FormValues};
use crate::record::Record;

/// Error taxonomy of form validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Missing,
    Format,
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub label: String,
    /// Wizard step holding the field, used for click-to-navigate
    pub step: usize,
    pub kind: ErrorKind,
    pub message: String,
}

/// Field-keyed validation errors, at most one per field, in form order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &FieldDescriptor, kind: ErrorKind, message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.add(field, kind, message);
        report
    }

    /// Record an error; the first error reported for a field wins
    pub fn add(&mut self, field: &FieldDescriptor, kind: ErrorKind, message: impl Into<String>) {
        self.push(FieldError {
            field: field.name.to_string(),
            label: field.label.to_string(),
            step: field.step,
            kind,
            message: message.into(),
        });
    }

    pub fn push(&mut self, error: FieldError) {
        if self.get(&error.field).is_none() {
            self.errors.push(error);
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Earliest step with an error, where a wizard should land for review
    pub fn first_step(&self) -> Option<usize> {
        self.errors.iter().map(|e| e.step).min()
    }

    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Answers whether a value is already taken by another record
pub trait ConflictCheck {
    fn conflicts(&self, field: &str, value: &str) -> bool;
}

/// For forms without uniqueness constraints
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConflicts;

impl ConflictCheck for NoConflicts {
    fn conflicts(&self, _field: &str, _value: &str) -> bool {
        false
    }
}

impl<F> ConflictCheck for F
where
    F: Fn(&str, &str) -> bool,
{
    fn conflicts(&self, field: &str, value: &str) -> bool {
        self(field, value)
    }
}

/// Rule spanning several fields or other stores, such as a location
/// hierarchy. Blank fields are left to the per-field checks.
pub trait RecordRules {
    fn check(&self, values: &FormValues) -> ValidationReport;
}

/// For forms whose fields stand on their own
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRules;

impl RecordRules for NoRules {
    fn check(&self, _values: &FormValues) -> ValidationReport {
        ValidationReport::new()
    }
}

/// Snapshot of the unique fields of a store, keyed by (field, value)
#[derive(Debug, Clone, Default)]
pub struct UniqueIndex {
    owners: HashMap<(String, String), String>,
    exclude: Option<String>,
}

impl UniqueIndex {
    /// Index `records`, ignoring the record being edited
    pub fn build<E: Record>(records: &[E], exclude: Option<&str>) -> Self {
        let unique_fields: Vec<&str> = E::schema()
            .fields
            .iter()
            .filter(|f| f.unique)
            .map(|f| f.name)
            .collect();

        let mut owners = HashMap::new();
        for record in records {
            for field in &unique_fields {
                if let Some(value) = record.field(field).filter(|v| !v.trim().is_empty()) {
                    owners.insert(
                        (field.to_string(), normalize(&value)),
                        record.id().to_string(),
                    );
                }
            }
        }

        Self {
            owners,
            exclude: exclude.map(str::to_string),
        }
    }

    pub fn owner(&self, field: &str, value: &str) -> Option<&str> {
        self.owners
            .get(&(field.to_string(), normalize(value)))
            .map(String::as_str)
    }
}

impl ConflictCheck for UniqueIndex {
    fn conflicts(&self, field: &str, value: &str) -> bool {
        match self.owner(field, value) {
            Some(owner) => self.exclude.as_deref() != Some(owner),
            None => false,
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Which fields a validation pass covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationScope {
    /// Every editable field, as for a new record
    Create,
    /// Only the fields present in the submission
    Update,
    /// Every editable field of one wizard step
    Step(usize),
}

impl FormSchema {
    /// Run required, format, and uniqueness checks over `values`
    pub fn validate(
        &self,
        values: &FormValues,
        scope: ValidationScope,
        conflicts: &dyn ConflictCheck,
    ) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();

        for field in self.fields.iter().filter(|f| !f.read_only) {
            let raw = match scope {
                ValidationScope::Create => values.get(field.name),
                ValidationScope::Step(step) if field.step == step => values.get(field.name),
                ValidationScope::Step(_) => continue,
                ValidationScope::Update if values.contains(field.name) => {
                    values.get(field.name)
                }
                ValidationScope::Update => continue,
            };

            let Some(raw) = raw else {
                if field.required {
                    report.add(field, ErrorKind::Missing, format!("{} is required", field.label));
                }
                continue;
            };

            if let Err(message) = field.kind.check(field.label, raw) {
                report.add(field, ErrorKind::Format, message);
                continue;
            }

            if field.unique && conflicts.conflicts(field.name, raw) {
                report.add(
                    field,
                    ErrorKind::Conflict,
                    format!("{} is already registered to another record", field.label),
                );
            }
        }

        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldKind;
    use crate::record::EntityKind;

    static SCHEMA: FormSchema = FormSchema {
        entity: EntityKind::Employee,
        steps: &["Personal", "Bank"],
        fields: &[
            FieldDescriptor::new("name", "Full Name", FieldKind::Text).required(),
            FieldDescriptor::new("mobile", "Mobile Number", FieldKind::Mobile)
                .required()
                .unique(),
            FieldDescriptor::new("email", "Email", FieldKind::Email),
            FieldDescriptor::new("ifsc", "IFSC Code", FieldKind::Ifsc)
                .required()
                .step(1),
            FieldDescriptor::new("status", "Status", FieldKind::Text).read_only(),
        ],
    };

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_create_reports_every_missing_field() {
        let report = SCHEMA
            .validate(&FormValues::new(), ValidationScope::Create, &NoConflicts)
            .unwrap_err();

        assert_eq!(report.len(), 3);
        assert_eq!(report.get("name").unwrap().kind, ErrorKind::Missing);
        assert_eq!(report.get("name").unwrap().message, "Full Name is required");
        assert_eq!(report.get("ifsc").unwrap().step, 1);
        assert!(!report.contains("email"));
        assert!(!report.contains("status"));
        assert_eq!(report.first_step(), Some(0));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let input = values(&[("name", "   "), ("mobile", "9876543210"), ("ifsc", "SBIN0001234")]);
        let report = SCHEMA
            .validate(&input, ValidationScope::Create, &NoConflicts)
            .unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("name").unwrap().kind, ErrorKind::Missing);
    }

    #[test]
    fn test_format_errors() {
        let input = values(&[
            ("name", "Ravi"),
            ("mobile", "912345678"),
            ("email", "ravi"),
            ("ifsc", "SBIN0001234"),
        ]);
        let report = SCHEMA
            .validate(&input, ValidationScope::Create, &NoConflicts)
            .unwrap_err();

        let mobile = report.get("mobile").unwrap();
        assert_eq!(mobile.kind, ErrorKind::Format);
        assert!(
            mobile
                .message
                .contains("must be a valid 10-digit Indian mobile number")
        );
        assert_eq!(report.get("email").unwrap().kind, ErrorKind::Format);
    }

    #[test]
    fn test_conflict_detected_through_closure() {
        let taken = |field: &str, value: &str| field == "mobile" && value == "9876543210";
        let input = values(&[("name", "Ravi"), ("mobile", "9876543210"), ("ifsc", "SBIN0001234")]);

        let report = SCHEMA
            .validate(&input, ValidationScope::Create, &taken)
            .unwrap_err();
        assert_eq!(report.get("mobile").unwrap().kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_update_scope_only_checks_provided_fields() {
        let input = values(&[("email", "ravi@palmco.in")]);
        assert!(SCHEMA.validate(&input, ValidationScope::Update, &NoConflicts).is_ok());

        let cleared = values(&[("name", "")]);
        let report = SCHEMA
            .validate(&cleared, ValidationScope::Update, &NoConflicts)
            .unwrap_err();
        assert_eq!(report.get("name").unwrap().kind, ErrorKind::Missing);
    }

    #[test]
    fn test_step_scope() {
        let report = SCHEMA
            .validate(&FormValues::new(), ValidationScope::Step(1), &NoConflicts)
            .unwrap_err();
        assert_eq!(report.len(), 1);
        assert!(report.contains("ifsc"));
    }

    #[test]
    fn test_report_keeps_first_error_per_field() {
        let field = &SCHEMA.fields[0];
        let mut report = ValidationReport::single(field, ErrorKind::Missing, "first");
        report.add(field, ErrorKind::Format, "second");
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("name").unwrap().message, "first");
        assert_eq!(report.to_string(), "first");
    }
}
