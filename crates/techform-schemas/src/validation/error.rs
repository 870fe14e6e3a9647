//! Validation error types for the signup schema
//!
//! Copyright (c) 2025 Techform Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of a field failure. Every kind is recoverable by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Value absent or empty
    Required,
    /// Attachment exceeds the byte limit
    TooLarge,
    /// Not syntactically valid for the field
    InvalidFormat,
    /// Syntactically valid but rejected by policy
    PolicyViolation,
    /// Shorter than the minimum length
    TooShort,
    /// Number outside the allowed bounds
    OutOfRange,
    /// Collection has fewer entries than required
    TooFew,
    /// Two fields that must agree do not
    Mismatch,
}

impl ErrorKind {
    /// Stable snake_case rule code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::TooLarge => "too_large",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::PolicyViolation => "policy_violation",
            ErrorKind::TooShort => "too_short",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::TooFew => "too_few",
            ErrorKind::Mismatch => "mismatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One step of a field path: a field name or an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Field(String),
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Ordered sequence of segments locating a value inside a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The record root
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path to a single top-level field
    pub fn field<N: AsRef<str>>(name: N) -> Self {
        Self(vec![PathSegment::Field(name.as_ref().to_string())])
    }

    /// Extend with a field name
    pub fn child<N: AsRef<str>>(&self, name: N) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.as_ref().to_string()));
        Self(segments)
    }

    /// Extend with an array index
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `prefix` is this path or one of its ancestors
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Same path with `prefix` prepended
    pub fn prefixed(&self, prefix: &FieldPath) -> Self {
        let mut segments = prefix.0.clone();
        segments.extend(self.0.iter().cloned());
        Self(segments)
    }

    /// Dotted identifier an input is bound under, e.g. `techs.0.title`
    pub fn binding_name(&self) -> String {
        self.0
            .iter()
            .map(|segment| match segment {
                PathSegment::Index(i) => i.to_string(),
                PathSegment::Field(name) => name.clone(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
            }
        }
        Ok(())
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Expected/actual detail attached to a field error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The validation rule that was violated
    pub rule: String,
    /// What was expected
    pub expected: String,
    /// What was actually found
    pub actual: String,
}

impl Violation {
    pub fn new<R, E, A>(rule: R, expected: E, actual: A) -> Self
    where
        R: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Self {
            rule: rule.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rule '{}' violated: expected {}, but found {}",
            self.rule, self.expected, self.actual
        )
    }
}

/// A single field-scoped validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct FieldError {
    /// Where the failure occurred
    pub path: FieldPath,
    /// What kind of failure it is
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// Expected/actual details, when the rule has any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error at '{}': {}", self.path, self.message)?;

        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }

        Ok(())
    }
}

impl FieldError {
    pub fn new<M: Into<String>>(path: FieldPath, kind: ErrorKind, message: M) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    pub fn with_violations<M: Into<String>>(
        path: FieldPath,
        kind: ErrorKind,
        message: M,
        violations: Vec<Violation>,
    ) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            violations,
        }
    }

    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Ordered set of every error found in one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s) occurred:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Errors addressed exactly to `path`
    pub fn at<'a, 'p>(&'a self, path: &'p FieldPath) -> impl Iterator<Item = &'a FieldError> + 'p
    where
        'a: 'p,
    {
        self.errors.iter().filter(move |e| &e.path == path)
    }

    /// Errors addressed to `path` or anything below it
    pub fn under<'a, 'p>(&'a self, path: &'p FieldPath) -> impl Iterator<Item = &'a FieldError> + 'p
    where
        'a: 'p,
    {
        self.errors.iter().filter(move |e| e.path.starts_with(path))
    }

    /// Whether any error sits at or below `path`
    pub fn touches(&self, path: &FieldPath) -> bool {
        self.under(path).next().is_some()
    }

    /// Whether an error of `kind` exists at the path rendered as `path`
    /// (e.g. `"techs[0].title"`)
    pub fn contains(&self, path: &str, kind: ErrorKind) -> bool {
        self.errors
            .iter()
            .any(|e| e.kind == kind && e.path.to_string() == path)
    }

    /// Rebase every error under `prefix`
    pub fn prefixed(self, prefix: &FieldPath) -> Self {
        Self {
            errors: self
                .errors
                .into_iter()
                .map(|mut e| {
                    e.path = e.path.prefixed(prefix);
                    e
                })
                .collect(),
        }
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Keep at most `max` errors
    pub fn truncate(&mut self, max: usize) {
        self.errors.truncate(max);
    }

    /// Ok if no errors, Err otherwise
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
