//! Typed rule chains for single fields and cross-field refinements
//!
//! A field is described by a coercion from its raw representation followed by
//! an ordered list of [`Rule`]s. Checks reject, transforms rewrite; the chain
//! stops at the first rejection so a transform never sees a value that failed
//! an earlier check.
//!
//! Copyright (c) 2025 Techform Team
//! Licensed under the Apache-2.0 license

use crate::validation::base::ValidationContext;
use crate::validation::error::{ErrorKind, FieldError, FieldPath, ValidationErrors, Violation};

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Rewrite<T> = Box<dyn Fn(T) -> T + Send + Sync>;
type Coerce<R, T> = Box<dyn Fn(&R) -> Result<T, Rejection> + Send + Sync>;
type Describe<T> = Box<dyn Fn(&T) -> String + Send + Sync>;
type RefinementCheck<D> = Box<dyn Fn(&D, &ValidationContext) -> Option<FieldError> + Send + Sync>;

/// A single step in a field's rule chain
pub enum Rule<T> {
    /// Reject the value unless `predicate` holds
    Check {
        kind: ErrorKind,
        message: String,
        /// Human description of what the check expects
        expected: Option<String>,
        predicate: Predicate<T>,
    },
    /// Rewrite a value that passed every earlier check
    Transform { name: &'static str, apply: Rewrite<T> },
}

/// Failure produced while coercing a raw value, before any rule runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: ErrorKind,
    pub message: String,
}

impl Rejection {
    pub fn new<M: Into<String>>(kind: ErrorKind, message: M) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn at(self, path: FieldPath) -> FieldError {
        FieldError::new(path, self.kind, self.message)
    }
}

/// Coercion plus ordered rule chain for one field
pub struct FieldSchema<R: ?Sized, T> {
    name: &'static str,
    coerce: Coerce<R, T>,
    describe: Describe<T>,
    rules: Vec<Rule<T>>,
}

impl<R: ?Sized, T> FieldSchema<R, T> {
    /// Start a field. `describe` renders the "actual" side of violations and
    /// must not leak secret values.
    pub fn new<C, D>(name: &'static str, coerce: C, describe: D) -> Self
    where
        C: Fn(&R) -> Result<T, Rejection> + Send + Sync + 'static,
        D: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            name,
            coerce: Box::new(coerce),
            describe: Box::new(describe),
            rules: Vec::new(),
        }
    }

    /// Append a check
    pub fn check<M, P>(mut self, kind: ErrorKind, message: M, predicate: P) -> Self
    where
        M: Into<String>,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule::Check {
            kind,
            message: message.into(),
            expected: None,
            predicate: Box::new(predicate),
        });
        self
    }

    /// Append a check that reports expected/actual detail when it fails
    pub fn check_expecting<M, E, P>(mut self, kind: ErrorKind, message: M, expected: E, predicate: P) -> Self
    where
        M: Into<String>,
        E: Into<String>,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule::Check {
            kind,
            message: message.into(),
            expected: Some(expected.into()),
            predicate: Box::new(predicate),
        });
        self
    }

    /// Append a transform
    pub fn transform<F>(mut self, name: &'static str, apply: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.rules.push(Rule::Transform {
            name,
            apply: Box::new(apply),
        });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    /// Coerce and run the chain under `ctx.child(name)`
    pub fn parse(&self, raw: &R, ctx: &ValidationContext) -> Result<T, FieldError> {
        let path = ctx.child(self.name).path;
        let mut value = (self.coerce)(raw).map_err(|rejection| rejection.at(path.clone()))?;

        for rule in &self.rules {
            match rule {
                Rule::Check {
                    kind,
                    message,
                    expected,
                    predicate,
                } => {
                    if !predicate(&value) {
                        let mut error = FieldError::new(path, *kind, message.clone());
                        if let Some(expected) = expected {
                            error.add_violation(Violation::new(
                                kind.code(),
                                expected.clone(),
                                (self.describe)(&value),
                            ));
                        }
                        return Err(error);
                    }
                }
                Rule::Transform { name, apply } => {
                    tracing::trace!(field = self.name, transform = name, "applying transform");
                    value = apply(value);
                }
            }
        }

        Ok(value)
    }
}

/// Cross-field check over a whole draft, producing zero or one error
pub struct Refinement<D> {
    name: &'static str,
    requires: Vec<&'static str>,
    check: RefinementCheck<D>,
}

impl<D> Refinement<D> {
    /// `requires` names the top-level fields whose rules must all have passed
    /// before the refinement is allowed to run.
    pub fn new<F>(name: &'static str, requires: &[&'static str], check: F) -> Self
    where
        F: Fn(&D, &ValidationContext) -> Option<FieldError> + Send + Sync + 'static,
    {
        Self {
            name,
            requires: requires.to_vec(),
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the refinement if its inputs are clean in `errors`
    pub fn apply(&self, draft: &D, errors: &ValidationErrors, ctx: &ValidationContext) -> Option<FieldError> {
        let inputs_clean = self
            .requires
            .iter()
            .all(|field| !errors.touches(&ctx.path.child(field)));

        if !inputs_clean {
            tracing::trace!(refinement = self.name, "skipped: inputs failed field rules");
            return None;
        }

        (self.check)(draft, ctx)
    }
}

/// Move a field outcome into the draft, recording its error
pub fn settle<T>(outcome: Result<T, FieldError>, errors: &mut ValidationErrors) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(error) => {
            errors.add(error);
            None
        }
    }
}
