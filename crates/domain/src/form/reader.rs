use std::str::FromStr;

use super::{ErrorKind, FieldDescriptor, FieldKind, FormSchema, FormValues, ValidationReport};

/// Typed access to [`FormValues`] that collects errors instead of failing fast.
///
/// Records use it to turn validated form input into their fields; any parse
/// failure still lands in the report returned by [`FieldReader::finish`].
pub struct FieldReader<'a> {
    values: &'a FormValues,
    schema: &'static FormSchema,
    report: ValidationReport,
}

impl<'a> FieldReader<'a> {
    pub fn new(values: &'a FormValues, schema: &'static FormSchema) -> Self {
        Self {
            values,
            schema,
            report: ValidationReport::new(),
        }
    }

    fn descriptor(&self, name: &'static str) -> FieldDescriptor {
        self.schema
            .field(name)
            .copied()
            .unwrap_or_else(|| FieldDescriptor::new(name, name, FieldKind::Text))
    }

    fn missing(&mut self, name: &'static str) {
        let field = self.descriptor(name);
        self.report
            .add(&field, ErrorKind::Missing, format!("{} is required", field.label));
    }

    fn parse<T: FromStr>(&mut self, name: &'static str, raw: &str) -> Option<T> {
        let value = match self.descriptor(name).kind {
            FieldKind::Select(options) => options
                .iter()
                .find(|o| o.eq_ignore_ascii_case(raw))
                .map_or(raw, |o| *o)
                .parse::<T>()
                .ok(),
            _ => raw.parse::<T>().ok(),
        };

        if value.is_none() {
            let field = self.descriptor(name);
            let message = field
                .kind
                .check(field.label, raw)
                .err()
                .unwrap_or_else(|| format!("{} is invalid", field.label));
            self.report.add(&field, ErrorKind::Format, message);
        }
        value
    }

    /// Required text; records a Missing error when blank
    pub fn text(&mut self, name: &'static str) -> String {
        match self.values.get(name) {
            Some(value) => value.to_string(),
            None => {
                self.missing(name);
                String::new()
            }
        }
    }

    /// Required typed value
    pub fn parsed<T: FromStr + Default>(&mut self, name: &'static str) -> T {
        let values = self.values;
        match values.get(name) {
            Some(raw) => self.parse(name, raw).unwrap_or_default(),
            None => {
                self.missing(name);
                T::default()
            }
        }
    }

    pub fn optional_text(&mut self, name: &'static str) -> Option<String> {
        self.values.get(name).map(str::to_string)
    }

    pub fn optional_parsed<T: FromStr>(&mut self, name: &'static str) -> Option<T> {
        let values = self.values;
        let raw = values.get(name)?;
        self.parse(name, raw)
    }

    /// Text for a merge: `None` when the form did not send the field
    pub fn provided_text(&mut self, name: &'static str) -> Option<String> {
        if !self.values.contains(name) {
            return None;
        }
        let value = self.optional_text(name);
        if value.is_none() {
            self.missing(name);
        }
        value
    }

    pub fn provided_parsed<T: FromStr>(&mut self, name: &'static str) -> Option<T> {
        let values = self.values;
        if !values.contains(name) {
            return None;
        }
        match values.get(name) {
            Some(raw) => self.parse(name, raw),
            None => {
                self.missing(name);
                None
            }
        }
    }

    /// Optional field in a merge: `Some(None)` clears it
    pub fn provided_optional(&mut self, name: &'static str) -> Option<Option<String>> {
        self.values
            .contains(name)
            .then(|| self.optional_text(name))
    }

    pub fn finish(self) -> Result<(), ValidationReport> {
        self.report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ActiveStatus, EntityKind};

    static SCHEMA: FormSchema = FormSchema {
        entity: EntityKind::District,
        steps: &["District"],
        fields: &[
            FieldDescriptor::new("name", "District Name", FieldKind::Text).required(),
            FieldDescriptor::new("code", "District Code", FieldKind::Number).required(),
            FieldDescriptor::new("status", "Status", FieldKind::Select(ActiveStatus::OPTIONS)),
        ],
    };

    #[test]
    fn test_reads_typed_values() {
        let values = FormValues::new()
            .with("name", "Warangal")
            .with("code", "07")
            .with("status", "inactive");
        let mut reader = values.reader(&SCHEMA);

        assert_eq!(reader.text("name"), "Warangal");
        assert_eq!(reader.parsed::<u32>("code"), 7);
        assert_eq!(
            reader.optional_parsed::<ActiveStatus>("status"),
            Some(ActiveStatus::Inactive)
        );
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_collects_errors() {
        let values = FormValues::new().with("code", "seven");
        let mut reader = values.reader(&SCHEMA);

        assert_eq!(reader.text("name"), "");
        assert_eq!(reader.parsed::<u32>("code"), 0);
        let report = reader.finish().unwrap_err();
        assert_eq!(report.get("name").unwrap().kind, ErrorKind::Missing);
        assert_eq!(report.get("code").unwrap().kind, ErrorKind::Format);
        assert_eq!(
            report.get("code").unwrap().message,
            "District Code must be a whole number"
        );
    }

    #[test]
    fn test_provided_values_for_merge() {
        let values = FormValues::new().with("name", "").with("status", "Active");
        let mut reader = values.reader(&SCHEMA);

        assert_eq!(reader.provided_parsed::<u32>("code"), None);
        assert_eq!(reader.provided_text("name"), None);
        assert_eq!(reader.provided_optional("status"), Some(Some("Active".to_string())));
        assert_eq!(reader.provided_optional("missing"), None);
        assert!(reader.finish().unwrap_err().contains("name"));
    }
}
