//! Form state for one wizard step.
//!
//! `FormData` gives the data structs a dynamic, name-addressed write
//! surface so the presentation layer can forward field edits without a
//! method per field. The trait lives here rather than in botsmith-types
//! because Rust does not allow inherent impls for types defined in
//! another crate.

use std::sync::{Arc, Mutex};

use botsmith_types::wizard::{FieldErrors, KnowledgeData, PersonalityData};

use super::schema::StepSchema;

/// Named-field write access for a step's data.
///
/// Unknown field names and values that fail to decode are silently
/// ignored -- invalid input never throws; validation reports problems
/// through the error map instead.
pub trait FormData: Clone + Default + std::fmt::Debug {
    fn set_field(&mut self, field: &str, value: serde_json::Value);
}

impl FormData for PersonalityData {
    fn set_field(&mut self, field: &str, value: serde_json::Value) {
        match field {
            "primaryTraits" => {
                if let Ok(traits) = serde_json::from_value(value) {
                    self.primary_traits = traits;
                }
            }
            "communicationTone" => {
                if let Ok(tone) = serde_json::from_value(value) {
                    self.communication_tone = tone;
                }
            }
            "formalityLevel" => {
                if let Ok(level) = serde_json::from_value(value) {
                    self.formality_level = level;
                }
            }
            "empathyLevel" => {
                if let Ok(level) = serde_json::from_value(value) {
                    self.empathy_level = level;
                }
            }
            "primaryFunction" => {
                self.primary_function = serde_json::from_value(value).ok();
            }
            "brandValues" => {
                self.brand_values = serde_json::from_value(value).ok();
            }
            _ => {} // Unknown fields silently ignored
        }
    }
}

impl FormData for KnowledgeData {
    fn set_field(&mut self, field: &str, value: serde_json::Value) {
        match field {
            "rules" => {
                if let Ok(rules) = serde_json::from_value(value) {
                    self.rules = rules;
                }
            }
            "companyInformation" => {
                if let Ok(info) = serde_json::from_value(value) {
                    self.company_information = info;
                }
            }
            _ => {}
        }
    }
}

/// Current values, error map, and validation flag for one step.
///
/// Created once per wizard instantiation and alive for the wizard's
/// lifetime -- state persists across back/forward navigation. Mutated
/// only by field edits, validation runs (error map only), and a
/// successful import completion (one designated knowledge field).
#[derive(Debug)]
pub struct StepFormState<S: StepSchema>
where
    S::Data: FormData,
{
    schema: S,
    values: S::Data,
    errors: FieldErrors,
    is_validating: bool,
}

impl<S: StepSchema> StepFormState<S>
where
    S::Data: FormData,
{
    /// Create the form with default values and an empty error map.
    pub fn new(schema: S) -> Self {
        Self {
            schema,
            values: S::Data::default(),
            errors: FieldErrors::new(),
            is_validating: false,
        }
    }

    /// Overwrite one field. Does not re-validate -- validation runs
    /// explicitly on navigation and submission, not on every keystroke.
    pub fn set_field(&mut self, field: &str, value: serde_json::Value) {
        self.values.set_field(field, value);
    }

    /// Run the schema against the current values and store the result.
    /// Returns true iff the error map came back empty.
    pub fn validate(&mut self) -> bool {
        self.is_validating = true;
        self.errors = self.schema.validate(&self.values);
        self.is_validating = false;

        tracing::debug!(errors = self.errors.len(), "step validated");
        self.errors.is_empty()
    }

    /// Snapshot of the current values. Does not reflect later edits.
    pub fn values(&self) -> S::Data {
        self.values.clone()
    }

    /// The error map from the most recent validation run.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The error message for one field, if the last validation flagged it.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_validating(&self) -> bool {
        self.is_validating
    }
}

/// Clone-shared view of a `StepFormState` (backed by `Arc<Mutex<...>>`).
///
/// The knowledge form is held this way so the import task can write its
/// one designated field out-of-band. Lock sections are short and never
/// held across an await.
#[derive(Debug)]
pub struct SharedForm<S: StepSchema>
where
    S::Data: FormData,
{
    inner: Arc<Mutex<StepFormState<S>>>,
}

impl<S: StepSchema> Clone for SharedForm<S>
where
    S::Data: FormData,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StepSchema> SharedForm<S>
where
    S::Data: FormData,
{
    pub fn new(schema: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StepFormState::new(schema))),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StepFormState<S>> {
        self.inner.lock().expect("form lock poisoned")
    }

    pub fn set_field(&self, field: &str, value: serde_json::Value) {
        self.lock().set_field(field, value);
    }

    pub fn validate(&self) -> bool {
        self.lock().validate()
    }

    pub fn values(&self) -> S::Data {
        self.lock().values()
    }

    pub fn errors(&self) -> FieldErrors {
        self.lock().errors().clone()
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.lock().error(field).map(str::to_string)
    }

    pub fn is_validating(&self) -> bool {
        self.lock().is_validating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::schema::{KnowledgeSchema, PersonalitySchema};
    use botsmith_types::wizard::{CommunicationTone, PrimaryFunction};
    use serde_json::json;

    #[test]
    fn test_set_field_overwrites_value() {
        let mut form = StepFormState::new(PersonalitySchema);

        form.set_field("primaryTraits", json!(["Friendly", "Analytical"]));
        form.set_field("communicationTone", json!("casual"));
        form.set_field("formalityLevel", json!(2));
        form.set_field("primaryFunction", json!("educator"));
        form.set_field("brandValues", json!("trust, simplicity"));

        let values = form.values();
        assert_eq!(values.primary_traits, vec!["Friendly", "Analytical"]);
        assert_eq!(values.communication_tone, CommunicationTone::Casual);
        assert_eq!(values.formality_level, 2);
        assert_eq!(values.primary_function, Some(PrimaryFunction::Educator));
        assert_eq!(values.brand_values.as_deref(), Some("trust, simplicity"));
    }

    #[test]
    fn test_set_field_ignores_unknown_name_and_bad_value() {
        let mut form = StepFormState::new(KnowledgeSchema);
        form.set_field("rules", json!("Be concise."));

        form.set_field("nonexistent", json!("value"));
        form.set_field("rules", json!(42)); // not a string, ignored

        assert_eq!(form.values().rules, "Be concise.");
    }

    #[test]
    fn test_set_field_does_not_validate() {
        let mut form = StepFormState::new(KnowledgeSchema);
        form.set_field("rules", json!(""));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_validate_stores_error_map() {
        let mut form = StepFormState::new(KnowledgeSchema);

        assert!(!form.validate());
        assert_eq!(form.error("rules"), Some("Rules are required"));

        form.set_field("rules", json!("Be concise."));
        form.set_field("companyInformation", json!("Founded in 2010."));

        assert!(form.validate());
        assert!(form.errors().is_empty());
        assert!(!form.is_validating());
    }

    #[test]
    fn test_values_is_a_snapshot() {
        let mut form = StepFormState::new(KnowledgeSchema);
        form.set_field("rules", json!("v1"));

        let snapshot = form.values();
        form.set_field("rules", json!("v2"));

        assert_eq!(snapshot.rules, "v1");
        assert_eq!(form.values().rules, "v2");
    }

    #[test]
    fn test_shared_form_clones_share_state() {
        let form = SharedForm::new(KnowledgeSchema);
        let view = form.clone();

        view.set_field("companyInformation", json!("Shared content"));

        assert_eq!(form.values().company_information, "Shared content");
    }
}
