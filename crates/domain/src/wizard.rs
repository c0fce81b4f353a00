use crate::form::{
    ConflictCheck, FormSchema, FormValues, RecordRules, ValidationReport, ValidationScope,
};
use crate::record::EntityKind;

/// Multi-step registration form over a stepped [`FormSchema`].
///
/// Moving forward validates the current step only; review validates every
/// step and aggregates the errors. Cross-field [`RecordRules`] are applied
/// at the step of the field they report on. A [`ValidatedDraft`] can only
/// come out of [`Wizard::finish`].
#[derive(Debug, Clone)]
pub struct Wizard {
    schema: &'static FormSchema,
    values: FormValues,
    current: usize,
}

impl Wizard {
    pub fn new(schema: &'static FormSchema) -> Self {
        Self {
            schema,
            values: FormValues::new(),
            current: 0,
        }
    }

    pub fn entity(&self) -> EntityKind {
        self.schema.entity
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step_title(&self) -> &'static str {
        self.schema.steps.get(self.current).copied().unwrap_or_default()
    }

    pub fn step_count(&self) -> usize {
        self.schema.steps.len().max(1)
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 >= self.step_count()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.set(field, value);
    }

    /// Validate the current step and move to the next one.
    /// On the last step this only validates.
    pub fn advance(
        &mut self,
        conflicts: &dyn ConflictCheck,
        rules: &dyn RecordRules,
    ) -> Result<usize, ValidationReport> {
        self.check(ValidationScope::Step(self.current), conflicts, rules)?;
        if !self.is_last_step() {
            self.current += 1;
        }
        Ok(self.current)
    }

    pub fn back(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// Jump to the step holding `field`, as when an error is clicked
    pub fn focus(&mut self, field: &str) -> Option<usize> {
        let step = self.schema.step_of(field)?;
        self.current = step;
        Some(step)
    }

    /// Validate all steps at once
    pub fn review(
        &self,
        conflicts: &dyn ConflictCheck,
        rules: &dyn RecordRules,
    ) -> Result<(), ValidationReport> {
        self.check(ValidationScope::Create, conflicts, rules)
    }

    /// Promote the draft once every step passes; on failure the wizard moves
    /// to the first step with an error
    pub fn finish(
        &mut self,
        conflicts: &dyn ConflictCheck,
        rules: &dyn RecordRules,
    ) -> Result<ValidatedDraft, ValidationReport> {
        match self.review(conflicts, rules) {
            Ok(()) => Ok(ValidatedDraft {
                entity: self.schema.entity,
                values: self.values.clone(),
            }),
            Err(report) => {
                if let Some(step) = report.first_step() {
                    self.current = step;
                }
                Err(report)
            }
        }
    }

    fn check(
        &self,
        scope: ValidationScope,
        conflicts: &dyn ConflictCheck,
        rules: &dyn RecordRules,
    ) -> Result<(), ValidationReport> {
        let mut report = self
            .schema
            .validate(&self.values, scope, conflicts)
            .err()
            .unwrap_or_default();
        for error in rules.check(&self.values).errors() {
            match scope {
                ValidationScope::Step(step) if error.step != step => {}
                _ => report.push(error.clone()),
            }
        }
        report.into_result()
    }
}

/// Registration input that passed every step of its wizard
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    entity: EntityKind,
    values: FormValues,
}

impl ValidatedDraft {
    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }
}
