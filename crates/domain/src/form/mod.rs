//! Data-driven forms: one descriptor table per entity drives validation,
//! search, and table projection for every CRUD page.

mod reader;
mod rules;
mod validation;

pub use reader::FieldReader;
pub use rules::FieldKind;
pub use validation::{
    ConflictCheck, ErrorKind, FieldError, NoConflicts, NoRules, RecordRules, UniqueIndex,
    ValidationReport, ValidationScope,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::EntityKind;

/// One row of an entity's field-descriptor table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Value must not belong to another record of the same store
    pub unique: bool,
    /// Included in free-text search
    pub searchable: bool,
    /// Shown and filterable, never written by a form
    pub read_only: bool,
    /// Wizard step the field belongs to
    pub step: usize,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            unique: false,
            searchable: false,
            read_only: false,
            step: 0,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub const fn step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }
}

/// Field-descriptor table of one entity
#[derive(Debug)]
pub struct FormSchema {
    pub entity: EntityKind,
    /// Step titles; single-page forms have one step
    pub steps: &'static [&'static str],
    pub fields: &'static [FieldDescriptor],
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn step_of(&self, name: &str) -> Option<usize> {
        self.field(name).map(|f| f.step)
    }

    pub fn step_fields(&self, step: usize) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(move |f| f.step == step)
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|f| f.searchable)
    }
}

/// Raw form input: field name to the text the user typed or picked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Trimmed value, `None` when absent or blank
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Whether the form submitted the field at all, even blank
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn reader(&self, schema: &'static FormSchema) -> FieldReader<'_> {
        FieldReader::new(self, schema)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Modal submission: no id means create, an id means edit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Option<String>,
    pub values: FormValues,
}

impl Submission {
    pub fn create(values: FormValues) -> Self {
        Self { id: None, values }
    }

    pub fn edit(id: impl Into<String>, values: FormValues) -> Self {
        Self {
            id: Some(id.into()),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_values_trim_and_blank() {
        let values = FormValues::new().with("name", "  Warangal ").with("code", "   ");
        assert_eq!(values.get("name"), Some("Warangal"));
        assert_eq!(values.get("code"), None);
        assert!(values.contains("code"));
        assert!(!values.contains("state"));
    }

    #[test]
    fn test_descriptor_builder() {
        const FIELD: FieldDescriptor = FieldDescriptor::new("mobile", "Mobile", FieldKind::Mobile)
            .required()
            .unique()
            .step(2);
        assert!(FIELD.required && FIELD.unique);
        assert!(!FIELD.searchable && !FIELD.read_only);
        assert_eq!(FIELD.step, 2);
    }

    #[test]
    fn test_submission_constructors() {
        assert!(Submission::create(FormValues::new()).id.is_none());
        assert_eq!(
            Submission::edit("D1", FormValues::new()).id.as_deref(),
            Some("D1")
        );
    }
}
