//! Live form state for one sign-up session
//!
//! Copyright (c) 2025 Techform Team
//! Licensed under the Apache-2.0 license

use crate::collection::{EntryId, TechCollection};
use crate::record::{FileHandle, NormalizedRecord, RawCandidateRecord};
use crate::validation::error::{FieldError, FieldPath, ValidationErrors, ValidationResult};
use crate::validation::{fields, SchemaValidator};
use serde::{Deserialize, Serialize};

/// Scalar text inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl ScalarField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarField::Name => fields::NAME,
            ScalarField::Email => fields::EMAIL,
            ScalarField::Password => fields::PASSWORD,
            ScalarField::ConfirmPassword => fields::CONFIRM_PASSWORD,
        }
    }
}

/// Host form state: scalar inputs, avatar file list and the tech collection.
/// Each submission supersedes the previous result.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    avatar: Vec<FileHandle>,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
    techs: TechCollection,
    last_result: Option<ValidationResult<NormalizedRecord>>,
    /// Entry order of the last submission; error paths index into it
    submitted_order: Vec<EntryId>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: ScalarField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ScalarField::Name => self.name = value,
            ScalarField::Email => self.email = value,
            ScalarField::Password => self.password = value,
            ScalarField::ConfirmPassword => self.confirm_password = value,
        }
    }

    pub fn get(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::Name => &self.name,
            ScalarField::Email => &self.email,
            ScalarField::Password => &self.password,
            ScalarField::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Replace the avatar file list
    pub fn set_avatar(&mut self, files: Vec<FileHandle>) {
        self.avatar = files;
    }

    pub fn techs(&self) -> &TechCollection {
        &self.techs
    }

    pub fn techs_mut(&mut self) -> &mut TechCollection {
        &mut self.techs
    }

    /// Snapshot the live state as a raw record
    pub fn to_raw(&self) -> RawCandidateRecord {
        RawCandidateRecord {
            avatar: self.avatar.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            techs: self.techs.project(),
        }
    }

    /// Validate the current state and remember the outcome
    pub fn submit<V>(&mut self, validator: &V) -> ValidationResult<NormalizedRecord>
    where
        V: SchemaValidator<Input = RawCandidateRecord, Output = NormalizedRecord>,
    {
        let result = validator.validate(&self.to_raw());
        match &result {
            Ok(_) => tracing::info!(techs = self.techs.len(), "submission accepted"),
            Err(errors) => tracing::info!(errors = errors.len(), "submission rejected"),
        }
        self.last_result = Some(result.clone());
        self.submitted_order = self.techs.ids().to_vec();
        result
    }

    pub fn last_result(&self) -> Option<&ValidationResult<NormalizedRecord>> {
        self.last_result.as_ref()
    }

    /// Errors of the latest submission, if it failed
    pub fn last_errors(&self) -> Option<&ValidationErrors> {
        match &self.last_result {
            Some(Err(errors)) => Some(errors),
            _ => None,
        }
    }

    /// Latest errors addressed to a top-level field
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        let path = FieldPath::field(field);
        self.last_errors()
            .map(|errors| errors.at(&path).collect())
            .unwrap_or_default()
    }

    /// Latest errors addressed to a tech entry. The entry is located by where
    /// it sat when submitted, so removals and moves since then do not hand
    /// its errors to a neighbour. Entries added after the submission have none.
    pub fn entry_errors(&self, id: EntryId) -> Vec<&FieldError> {
        let position = self.submitted_order.iter().position(|candidate| *candidate == id);
        match (self.last_errors(), position) {
            (Some(errors), Some(position)) if self.techs.position_of(id).is_some() => {
                TechCollection::errors_at(position, errors)
            }
            _ => Vec::new(),
        }
    }

    /// Back to a blank form
    pub fn reset(&mut self) {
        tracing::debug!("form session reset");
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawTech;
    use crate::validation::{ErrorKind, SignupSchema};

    #[test]
    fn test_to_raw_projects_collection() {
        let mut session = FormSession::new();
        session.set(ScalarField::Name, "ana");
        let id = session.techs_mut().append(RawTech::new("Go", "50"));
        session.techs_mut().append_default();

        let raw = session.to_raw();
        assert_eq!(raw.name, "ana");
        assert_eq!(raw.techs.len(), 2);
        assert_eq!(raw.techs[0].title, "Go");
        assert_eq!(session.techs().position_of(id), Some(0));
    }

    #[test]
    fn test_submit_records_errors() {
        let schema = SignupSchema::new();
        let mut session = FormSession::new();
        session.techs_mut().append_default();

        assert!(session.submit(&schema).is_err());
        assert_eq!(session.field_errors("name")[0].kind, ErrorKind::Required);

        let id = session.techs().id_at(0).unwrap();
        let kinds: Vec<_> = session.entry_errors(id).iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::Required, ErrorKind::OutOfRange]);
    }

    #[test]
    fn test_entry_errors_survive_removal_without_resubmit() {
        let schema = SignupSchema::new();
        let mut session = FormSession::new();
        let bad = session.techs_mut().append(RawTech::new("", "500"));
        let good = session.techs_mut().append(RawTech::new("Rust", "80"));
        assert!(session.submit(&schema).is_err());
        assert_eq!(session.entry_errors(bad).len(), 2);

        session.techs_mut().remove(bad);
        assert!(session.entry_errors(good).is_empty());
        assert!(session.entry_errors(bad).is_empty());
    }

    #[test]
    fn test_entry_errors_follow_moves_and_skip_new_rows() {
        let schema = SignupSchema::new();
        let mut session = FormSession::new();
        let good = session.techs_mut().append(RawTech::new("Go", "50"));
        let bad = session.techs_mut().append(RawTech::new("Zig", "0"));
        let _ = session.submit(&schema);

        session.techs_mut().move_entry(1, 0);
        let fresh = session.techs_mut().insert_at(0, RawTech::default());

        let kinds: Vec<_> = session.entry_errors(bad).iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::OutOfRange]);
        assert!(session.entry_errors(good).is_empty());
        assert!(session.entry_errors(fresh).is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let schema = SignupSchema::new();
        let mut session = FormSession::new();
        session.set(ScalarField::Email, "a@gmail.com");
        session.techs_mut().append_default();
        let _ = session.submit(&schema);

        session.reset();
        assert_eq!(session.get(ScalarField::Email), "");
        assert!(session.techs().is_empty());
        assert!(session.last_result().is_none());
    }
}
