//! Sign-up record schema
//!
//! Field rules run independently in declaration order (avatar, name, email,
//! password, confirmPassword, techs) so one pass reports every problem. The
//! password confirmation refinement runs afterwards, and only when both
//! password fields passed their own rules.
//!
//! Copyright (c) 2025 Techform Team
//! Licensed under the Apache-2.0 license

use crate::record::{FileHandle, NormalizedRecord, RawCandidateRecord, RawKnowledge, Tech};
use crate::validation::base::{SchemaValidator, ValidationContext, ValidationHelpers};
use crate::validation::error::{ErrorKind, FieldError, ValidationErrors, ValidationResult, Violation};
use crate::validation::rules::{settle, FieldSchema, Refinement, Rejection};

/// Field names as they appear in paths and input bindings
pub mod fields {
    pub const AVATAR: &str = "avatar";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const TECHS: &str = "techs";
    pub const TITLE: &str = "title";
    pub const KNOWLEDGE: &str = "knowledge";
}

/// Largest accepted avatar, in bytes (10 MiB)
pub const MAX_AVATAR_BYTES: u64 = 10 * 1024 * 1024;
/// Every accepted email must end with this, compared after lower-casing
pub const REQUIRED_EMAIL_SUFFIX: &str = "@gmail.com";
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_TECHS: usize = 2;
pub const KNOWLEDGE_MIN: u8 = 1;
pub const KNOWLEDGE_MAX: u8 = 100;

/// Fixed parameters the schema is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLimits {
    pub max_avatar_bytes: u64,
    pub required_email_suffix: String,
    pub min_password_len: usize,
    pub min_techs: usize,
    pub knowledge_min: u8,
    pub knowledge_max: u8,
}

impl Default for SchemaLimits {
    fn default() -> Self {
        Self {
            max_avatar_bytes: MAX_AVATAR_BYTES,
            required_email_suffix: REQUIRED_EMAIL_SUFFIX.to_string(),
            min_password_len: MIN_PASSWORD_LEN,
            min_techs: MIN_TECHS,
            knowledge_min: KNOWLEDGE_MIN,
            knowledge_max: KNOWLEDGE_MAX,
        }
    }
}

/// Per-entry outcome of the techs array
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TechDraft {
    pub title: Option<String>,
    pub knowledge: Option<u8>,
}

/// Everything one validation pass learned about a record: the normalized
/// value of each field that passed, plus every error found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignupDraft {
    pub avatar: Option<FileHandle>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub techs: Vec<TechDraft>,
    pub errors: ValidationErrors,
}

impl SignupDraft {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Strict outcome: any error aborts the whole record
    pub fn into_result(self) -> ValidationResult<NormalizedRecord> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        let techs = self
            .techs
            .into_iter()
            .map(|tech| {
                Some(Tech {
                    title: tech.title?,
                    knowledge: tech.knowledge?,
                })
            })
            .collect::<Option<Vec<_>>>();

        let (Some(avatar), Some(name), Some(email), Some(password), Some(confirm_password), Some(techs)) = (
            self.avatar,
            self.name,
            self.email,
            self.password,
            self.confirm_password,
            techs,
        ) else {
            return Err(self.errors);
        };

        Ok(NormalizedRecord {
            avatar,
            name,
            email,
            password,
            confirm_password,
            techs,
        })
    }
}

/// Declarative schema for the sign-up record
pub struct SignupSchema {
    limits: SchemaLimits,
    avatar: FieldSchema<[FileHandle], FileHandle>,
    name: FieldSchema<str, String>,
    email: FieldSchema<str, String>,
    password: FieldSchema<str, String>,
    confirm_password: FieldSchema<str, String>,
    tech_title: FieldSchema<str, String>,
    tech_knowledge: FieldSchema<RawKnowledge, f64>,
    refinements: Vec<Refinement<SignupDraft>>,
}

impl SignupSchema {
    /// Build the schema with the production limits
    pub fn new() -> Self {
        Self::with_limits(SchemaLimits::default())
    }

    pub fn with_limits(limits: SchemaLimits) -> Self {
        let max_bytes = limits.max_avatar_bytes;
        let avatar = FieldSchema::new(
            fields::AVATAR,
            |files: &[FileHandle]| {
                files
                    .first()
                    .cloned()
                    .ok_or_else(|| Rejection::new(ErrorKind::Required, "Avatar is required"))
            },
            |file: &FileHandle| format!("{} bytes", file.size),
        )
        .check_expecting(
            ErrorKind::TooLarge,
            format!("Avatar must be at most {}", human_bytes(max_bytes)),
            format!("at most {} bytes", max_bytes),
            move |file| file.size <= max_bytes,
        );

        let name = text_field(fields::NAME)
            .check(ErrorKind::Required, "Name is required", |v| !ValidationHelpers::is_blank(v))
            .transform("capitalize_words", |v| ValidationHelpers::capitalize_words(&v));

        let suffix = limits.required_email_suffix.to_lowercase();
        let email = text_field(fields::EMAIL)
            .check(ErrorKind::Required, "Email is required", |v| !v.is_empty())
            .check(ErrorKind::InvalidFormat, "Email format is invalid", |v| {
                ValidationHelpers::is_valid_email(v)
            })
            .transform("lowercase", |v| v.to_lowercase())
            .check(
                ErrorKind::PolicyViolation,
                format!("Only {} addresses are accepted", suffix),
                move |v| v.ends_with(&suffix),
            );

        let password = password_field(fields::PASSWORD, "Password", limits.min_password_len);
        let confirm_password =
            password_field(fields::CONFIRM_PASSWORD, "Password confirmation", limits.min_password_len);

        let tech_title = text_field(fields::TITLE).check(ErrorKind::Required, "Title is required", |v| !v.is_empty());

        let (low, high) = (f64::from(limits.knowledge_min), f64::from(limits.knowledge_max));
        let tech_knowledge = FieldSchema::new(
            fields::KNOWLEDGE,
            |raw: &RawKnowledge| Ok(ValidationHelpers::coerce_number(raw).unwrap_or(f64::NAN)),
            |n: &f64| if n.is_nan() { "not a number".to_string() } else { n.to_string() },
        )
        .check_expecting(
            ErrorKind::OutOfRange,
            format!("Knowledge must be between {} and {}", limits.knowledge_min, limits.knowledge_max),
            format!("an integer from {} to {}", limits.knowledge_min, limits.knowledge_max),
            move |n| (low..=high).contains(n) && n.fract() == 0.0,
        );

        let refinements = vec![Refinement::new(
            "passwords_match",
            &[fields::PASSWORD, fields::CONFIRM_PASSWORD],
            |draft: &SignupDraft, ctx: &ValidationContext| match (&draft.password, &draft.confirm_password) {
                (Some(password), Some(confirm)) if password != confirm => Some(FieldError::new(
                    ctx.child(fields::CONFIRM_PASSWORD).path,
                    ErrorKind::Mismatch,
                    "Passwords do not match",
                )),
                _ => None,
            },
        )];

        Self {
            limits,
            avatar,
            name,
            email,
            password,
            confirm_password,
            tech_title,
            tech_knowledge,
            refinements,
        }
    }

    pub fn limits(&self) -> &SchemaLimits {
        &self.limits
    }

    /// Run every field rule and, in strict mode, every refinement
    pub fn parse(&self, raw: &RawCandidateRecord, ctx: &ValidationContext) -> SignupDraft {
        let mut errors = ValidationErrors::new();

        let avatar = settle(self.avatar.parse(&raw.avatar, ctx), &mut errors);
        let name = settle(self.name.parse(&raw.name, ctx), &mut errors);
        let email = settle(self.email.parse(&raw.email, ctx), &mut errors);
        let password = settle(self.password.parse(&raw.password, ctx), &mut errors);
        let confirm_password = settle(self.confirm_password.parse(&raw.confirm_password, ctx), &mut errors);

        let techs_ctx = ctx.child(fields::TECHS);
        if raw.techs.len() < self.limits.min_techs {
            errors.add(FieldError::with_violations(
                techs_ctx.path.clone(),
                ErrorKind::TooFew,
                format!("At least {} techs are required", self.limits.min_techs),
                vec![Violation::new(
                    ErrorKind::TooFew.code(),
                    format!("at least {} entries", self.limits.min_techs),
                    format!("{} entries", raw.techs.len()),
                )],
            ));
        }

        let mut techs = Vec::with_capacity(raw.techs.len());
        for (index, tech) in raw.techs.iter().enumerate() {
            let entry_ctx = techs_ctx.child_index(index);
            let title = settle(self.tech_title.parse(&tech.title, &entry_ctx), &mut errors);
            let knowledge = settle(self.tech_knowledge.parse(&tech.knowledge, &entry_ctx), &mut errors)
                // The integer range check guarantees the cast is lossless
                .map(|n| n as u8);
            techs.push(TechDraft { title, knowledge });
        }

        let mut draft = SignupDraft {
            avatar,
            name,
            email,
            password,
            confirm_password,
            techs,
            errors: ValidationErrors::new(),
        };

        if ctx.runs_refinements() {
            for refinement in &self.refinements {
                if let Some(error) = refinement.apply(&draft, &errors, ctx) {
                    errors.add(error);
                }
            }
        }

        tracing::debug!(
            mode = ?ctx.mode,
            techs = raw.techs.len(),
            errors = errors.len(),
            "signup record validated"
        );

        draft.errors = errors;
        draft
    }
}

impl Default for SignupSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidator for SignupSchema {
    type Input = RawCandidateRecord;
    type Output = NormalizedRecord;

    fn validate_with_context(
        &self,
        raw: &RawCandidateRecord,
        ctx: &ValidationContext,
    ) -> ValidationResult<NormalizedRecord> {
        self.parse(raw, ctx).into_result()
    }
}

fn text_field(name: &'static str) -> FieldSchema<str, String> {
    FieldSchema::new(
        name,
        |raw: &str| Ok(raw.to_string()),
        |value: &String| format!("{} characters", ValidationHelpers::char_len(value)),
    )
}

fn password_field(name: &'static str, label: &str, min_len: usize) -> FieldSchema<str, String> {
    text_field(name).check_expecting(
        ErrorKind::TooShort,
        format!("{} must be at least {} characters", label, min_len),
        format!("at least {} characters", min_len),
        move |v| ValidationHelpers::char_len(v) >= min_len,
    )
}

fn human_bytes(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes % MIB == 0 {
        format!("{} MiB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawTech;
    use crate::validation::base::ValidationMode;

    fn valid_raw() -> RawCandidateRecord {
        RawCandidateRecord {
            avatar: vec![FileHandle::new("me.png", 1024)],
            name: "ana silva".to_string(),
            email: "ana@gmail.com".to_string(),
            password: "12345678".to_string(),
            confirm_password: "12345678".to_string(),
            techs: vec![RawTech::new("Go", "50"), RawTech::new("Rust", 80u8)],
        }
    }

    #[test]
    fn test_valid_record_normalizes() {
        let record = SignupSchema::new().validate(&valid_raw()).unwrap();
        assert_eq!(record.name, "Ana Silva");
        assert_eq!(record.avatar.name, "me.png");
        assert_eq!(record.techs[0], Tech { title: "Go".into(), knowledge: 50 });
        assert_eq!(record.techs[1].knowledge, 80);
    }

    #[test]
    fn test_basic_mode_skips_refinements() {
        let mut raw = valid_raw();
        raw.confirm_password = "87654321".to_string();
        let schema = SignupSchema::new();

        assert!(schema.validate_basic(&raw).is_ok());
        let errors = schema.validate(&raw).unwrap_err();
        assert!(errors.contains("confirmPassword", ErrorKind::Mismatch));
    }

    #[test]
    fn test_mismatch_not_reported_when_confirmation_invalid() {
        let mut raw = valid_raw();
        raw.confirm_password = "short".to_string();
        let errors = SignupSchema::new().validate(&raw).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors.contains("confirmPassword", ErrorKind::TooShort));
    }

    #[test]
    fn test_custom_limits() {
        let limits = SchemaLimits {
            min_techs: 1,
            required_email_suffix: "@Example.org".to_string(),
            ..SchemaLimits::default()
        };
        let mut raw = valid_raw();
        raw.email = "Ana@EXAMPLE.org".to_string();
        raw.techs.truncate(1);

        let record = SignupSchema::with_limits(limits).validate(&raw).unwrap();
        assert_eq!(record.email, "ana@example.org");
    }

    #[test]
    fn test_knowledge_must_be_integer() {
        let mut raw = valid_raw();
        raw.techs[0].knowledge = RawKnowledge::Number(50.5);
        let errors = SignupSchema::new().validate(&raw).unwrap_err();
        assert!(errors.contains("techs[0].knowledge", ErrorKind::OutOfRange));
    }

    #[test]
    fn test_context_prefix_is_kept() {
        let ctx = ValidationContext::new(ValidationMode::Strict).child_index(4);
        let draft = SignupSchema::new().parse(&RawCandidateRecord::default(), &ctx);
        assert!(draft.errors.contains("[4].name", ErrorKind::Required));
        assert!(draft.errors.contains("[4].techs", ErrorKind::TooFew));
    }

    #[test]
    fn test_human_bytes() {
        assert_eq!(human_bytes(MAX_AVATAR_BYTES), "10 MiB");
        assert_eq!(human_bytes(1500), "1500 bytes");
    }
}
