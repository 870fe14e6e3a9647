//! Base validation trait and common utilities
//!
//! Copyright (c) 2025 Techform Team
//! Licensed under the Apache-2.0 license

use crate::record::RawKnowledge;
use crate::validation::error::{FieldPath, ValidationErrors, ValidationResult};
use regex::Regex;
use std::sync::OnceLock;

/// Validation mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Field rules followed by cross-field refinements
    Strict,
    /// Field rules only, for per-field feedback before submission
    Basic,
}

/// Validation context for passing the current location and mode
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Current field path
    pub path: FieldPath,
    /// Validation mode
    pub mode: ValidationMode,
}

impl ValidationContext {
    /// Create a context rooted at the record
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            path: FieldPath::root(),
            mode,
        }
    }

    /// Create a child context for a named field
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        Self {
            path: self.path.child(path_segment),
            mode: self.mode,
        }
    }

    /// Create a child context for an array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: self.path.child_index(index),
            mode: self.mode,
        }
    }

    /// Whether cross-field refinements run in this mode
    pub fn runs_refinements(&self) -> bool {
        self.mode == ValidationMode::Strict
    }
}

/// Base trait for schema validators
pub trait SchemaValidator {
    /// The raw type being validated
    type Input;
    /// The normalized type produced on success
    type Output;

    /// Validate with all rules and refinements
    fn validate(&self, input: &Self::Input) -> ValidationResult<Self::Output> {
        let context = ValidationContext::new(ValidationMode::Strict);
        self.validate_with_context(input, &context)
    }

    /// Validate with specific context and mode
    fn validate_with_context(
        &self,
        input: &Self::Input,
        context: &ValidationContext,
    ) -> ValidationResult<Self::Output>;

    /// Validate field rules only
    fn validate_basic(&self, input: &Self::Input) -> ValidationResult<Self::Output> {
        let context = ValidationContext::new(ValidationMode::Basic);
        self.validate_with_context(input, &context)
    }

    /// Collect all validation errors (non-failing)
    fn collect_errors(&self, input: &Self::Input) -> ValidationErrors {
        match self.validate(input) {
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors,
        }
    }
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Helper functions shared by field rules
pub struct ValidationHelpers;

impl ValidationHelpers {
    /// Empty or whitespace only
    pub fn is_blank(value: &str) -> bool {
        value.trim().is_empty()
    }

    /// Length in characters, not bytes
    pub fn char_len(value: &str) -> usize {
        value.chars().count()
    }

    /// Syntactic email check: dot-atom local part, dotted host, alphabetic TLD
    pub fn is_valid_email(value: &str) -> bool {
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
                .expect("email pattern is a valid regex")
        });

        !value.starts_with('.') && !value.contains("..") && regex.is_match(value)
    }

    /// Upper-case the first letter of each whitespace-separated token and
    /// join the tokens with single spaces. Blank input yields an empty string.
    pub fn capitalize_words(value: &str) -> String {
        value
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Numeric coercion of a knowledge value. Blank text counts as zero;
    /// anything unparsable or non-finite yields `None`.
    pub fn coerce_number(raw: &RawKnowledge) -> Option<f64> {
        let number = match raw {
            RawKnowledge::Number(n) => *n,
            RawKnowledge::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    0.0
                } else {
                    text.parse::<f64>().ok()?
                }
            }
        };

        number.is_finite().then_some(number)
    }
}
