//! Validation module for the sign-up record
//!
//! Every field is described by an explicit ordered rule chain (checks and
//! transforms) and the record by a short list of cross-field refinements.
//! Two modes are supported:
//!
//! - **Strict**: field rules + refinements (submission)
//! - **Basic**: field rules only (per-field feedback while editing)
//!
//! Copyright (c) 2025 Techform Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod error;
pub mod rules;
pub mod signup;

// Re-export commonly used types
pub use base::{SchemaValidator, ValidationContext, ValidationHelpers, ValidationMode};
pub use error::{ErrorKind, FieldError, FieldPath, PathSegment, ValidationErrors, ValidationResult, Violation};
pub use rules::{FieldSchema, Refinement, Rejection, Rule};
pub use signup::{fields, SchemaLimits, SignupDraft, SignupSchema, TechDraft};

use crate::record::{NormalizedRecord, RawCandidateRecord};

/// Convenience function to create the sign-up validator
///
/// # Examples
///
/// ```rust
/// use techform_schemas::validation::{create_signup_validator, SchemaValidator};
/// use techform_schemas::RawCandidateRecord;
///
/// let validator = create_signup_validator();
/// let errors = validator.collect_errors(&RawCandidateRecord::default());
/// assert!(!errors.is_empty());
/// ```
pub fn create_signup_validator() -> SignupSchema {
    SignupSchema::new()
}

/// Validation configuration for batch operations
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Validation mode to use
    pub mode: ValidationMode,
    /// Whether to stop on the first failing record
    pub fail_fast: bool,
    /// Maximum number of errors to collect (0 = unlimited)
    pub max_errors: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Strict,
            fail_fast: false,
            max_errors: 0,
        }
    }
}

impl ValidationConfig {
    /// Create a configuration for strict validation
    pub fn strict() -> Self {
        Self::default()
    }

    /// Create a configuration for field-only validation
    pub fn basic() -> Self {
        Self {
            mode: ValidationMode::Basic,
            ..Self::default()
        }
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Batch validation for several raw records. Error paths are prefixed with
/// the record's index; normalized records are returned only if every record
/// passed.
pub fn validate_records_batch(
    records: &[RawCandidateRecord],
    config: &ValidationConfig,
) -> ValidationResult<Vec<NormalizedRecord>> {
    let validator = create_signup_validator();
    let context = ValidationContext::new(config.mode);

    let mut normalized = Vec::with_capacity(records.len());
    let mut errors = ValidationErrors::new();

    for (i, record) in records.iter().enumerate() {
        let record_context = context.child_index(i);
        match validator.validate_with_context(record, &record_context) {
            Ok(record) => normalized.push(record),
            Err(record_errors) => {
                errors.extend(record_errors);

                if config.max_errors > 0 && errors.len() >= config.max_errors {
                    errors.truncate(config.max_errors);
                    break;
                }

                if config.fail_fast {
                    break;
                }
            }
        }
    }

    errors.into_result().map(|()| normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FileHandle, RawTech};

    fn valid_record() -> RawCandidateRecord {
        RawCandidateRecord {
            avatar: vec![FileHandle::new("a.png", 10)],
            name: "joão".to_string(),
            email: "joao@gmail.com".to_string(),
            password: "password1".to_string(),
            confirm_password: "password1".to_string(),
            techs: vec![RawTech::new("Go", 1u8), RawTech::new("Rust", 100u8)],
        }
    }

    #[test]
    fn test_validation_config_defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.mode, ValidationMode::Strict);
        assert!(!config.fail_fast);
        assert_eq!(config.max_errors, 0);
    }

    #[test]
    fn test_validation_config_builders() {
        let strict = ValidationConfig::strict().with_fail_fast().with_max_errors(5);
        assert_eq!(strict.mode, ValidationMode::Strict);
        assert!(strict.fail_fast);
        assert_eq!(strict.max_errors, 5);

        assert_eq!(ValidationConfig::basic().mode, ValidationMode::Basic);
    }

    #[test]
    fn test_batch_all_valid() {
        let records = vec![valid_record(), valid_record()];
        let normalized = validate_records_batch(&records, &ValidationConfig::strict()).unwrap();
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].name, "João");
    }

    #[test]
    fn test_batch_prefixes_record_index() {
        let mut broken = valid_record();
        broken.name = "   ".to_string();
        let records = vec![valid_record(), broken];

        let errors = validate_records_batch(&records, &ValidationConfig::strict()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("[1].name", ErrorKind::Required));
    }

    #[test]
    fn test_batch_fail_fast_and_max_errors() {
        let records = vec![RawCandidateRecord::default(), RawCandidateRecord::default()];

        let all = validate_records_batch(&records, &ValidationConfig::strict()).unwrap_err();
        let first_only = validate_records_batch(&records, &ValidationConfig::strict().with_fail_fast()).unwrap_err();
        assert_eq!(first_only.len() * 2, all.len());
        assert!(first_only.iter().all(|e| e.path.to_string().starts_with("[0]")));

        let capped = validate_records_batch(&records, &ValidationConfig::strict().with_max_errors(3)).unwrap_err();
        assert_eq!(capped.len(), 3);
    }
}
