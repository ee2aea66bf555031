//! Per-step validation contracts.
//!
//! A `StepSchema` is pure and synchronous: it maps a step's data to a
//! `FieldErrors` map and never mutates anything. The caller
//! (`StepFormState::validate`) stores the result.

use botsmith_types::wizard::{FieldErrors, KnowledgeData, PersonalityData, TRAIT_OPTIONS};

/// Validation contract for one step's data.
pub trait StepSchema {
    type Data;

    /// Validate the data. Empty map = valid. Keys are the serialized
    /// (camelCase) field names.
    fn validate(&self, data: &Self::Data) -> FieldErrors;
}

/// Schema for the personality & purpose step.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalitySchema;

impl StepSchema for PersonalitySchema {
    type Data = PersonalityData;

    fn validate(&self, data: &PersonalityData) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if data.primary_traits.is_empty() {
            errors.insert(
                "primaryTraits".to_string(),
                "Select at least one personality trait".to_string(),
            );
        } else if data
            .primary_traits
            .iter()
            .any(|t| !TRAIT_OPTIONS.contains(&t.as_str()))
        {
            errors.insert(
                "primaryTraits".to_string(),
                "Personality traits must be chosen from the provided options".to_string(),
            );
        }

        if data.primary_function.is_none() {
            errors.insert(
                "primaryFunction".to_string(),
                "Select a primary function".to_string(),
            );
        }

        // Slider levels and communication tone are constrained by their
        // types; the input surface owns range clamping.

        errors
    }
}

/// Schema for the rules & knowledge step.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeSchema;

impl StepSchema for KnowledgeSchema {
    type Data = KnowledgeData;

    fn validate(&self, data: &KnowledgeData) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if data.rules.is_empty() {
            errors.insert("rules".to_string(), "Rules are required".to_string());
        }

        if data.company_information.is_empty() {
            errors.insert(
                "companyInformation".to_string(),
                "Company information is required".to_string(),
            );
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botsmith_types::wizard::PrimaryFunction;

    fn valid_personality() -> PersonalityData {
        PersonalityData {
            primary_traits: vec!["Friendly".to_string()],
            primary_function: Some(PrimaryFunction::Assistant),
            ..PersonalityData::default()
        }
    }

    #[test]
    fn test_personality_defaults_fail_with_documented_messages() {
        let errors = PersonalitySchema.validate(&PersonalityData::default());

        assert_eq!(
            errors.get("primaryTraits").map(String::as_str),
            Some("Select at least one personality trait")
        );
        assert_eq!(
            errors.get("primaryFunction").map(String::as_str),
            Some("Select a primary function")
        );
    }

    #[test]
    fn test_personality_valid_sample_passes() {
        let errors = PersonalitySchema.validate(&valid_personality());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_personality_rejects_trait_outside_vocabulary() {
        let mut data = valid_personality();
        data.primary_traits.push("Sarcastic".to_string());

        let errors = PersonalitySchema.validate(&data);
        assert_eq!(
            errors.get("primaryTraits").map(String::as_str),
            Some("Personality traits must be chosen from the provided options")
        );
    }

    #[test]
    fn test_knowledge_empty_fields_fail_with_documented_messages() {
        let errors = KnowledgeSchema.validate(&KnowledgeData::default());

        assert_eq!(errors.get("rules").map(String::as_str), Some("Rules are required"));
        assert_eq!(
            errors.get("companyInformation").map(String::as_str),
            Some("Company information is required")
        );
    }

    #[test]
    fn test_knowledge_valid_sample_passes() {
        let data = KnowledgeData {
            rules: "Always respond in under 100 words.".to_string(),
            company_information: "Founded in 2010, based in San Francisco.".to_string(),
        };
        assert!(KnowledgeSchema.validate(&data).is_empty());
    }

    #[test]
    fn test_validate_is_pure() {
        let data = PersonalityData::default();
        let first = PersonalitySchema.validate(&data);
        let second = PersonalitySchema.validate(&data);
        assert_eq!(first, second);
        assert_eq!(data, PersonalityData::default());
    }
}
