//! Techform Schemas - declarative sign-up validation and the dynamic tech list
//!
//! This crate validates and normalizes the sign-up record a form submits:
//! an avatar attachment, name, email, password with confirmation, and a
//! variable-length list of techs with a knowledge level each.
//!
//! ## Features
//!
//! - **Rule chains**: each field is an explicit ordered list of checks and
//!   transforms; a transform never runs on a value that failed a check
//! - **Refinements**: cross-field checks run after the fields they read passed
//! - **Complete error sets**: one pass reports every failing field, each with
//!   a precise path such as `techs[1].knowledge`
//! - **Stable collection ids**: the tech list keeps entry identity across
//!   removals and moves while validation sees a plain index-ordered array
//!
//! ## Quick Start
//!
//! ```rust
//! use techform_schemas::{
//!     create_signup_validator, ErrorKind, FileHandle, FormSession, RawTech, ScalarField,
//!     SchemaValidator,
//! };
//!
//! let validator = create_signup_validator();
//! let mut session = FormSession::new();
//! session.set_avatar(vec![FileHandle::new("me.png", 2048)]);
//! session.set(ScalarField::Name, "  ana silva ");
//! session.set(ScalarField::Email, "ANA@gmail.com");
//! session.set(ScalarField::Password, "12345678");
//! session.set(ScalarField::ConfirmPassword, "12345678");
//! session.techs_mut().append(RawTech::new("Go", "50"));
//! session.techs_mut().append(RawTech::new("Rust", "80"));
//!
//! let record = session.submit(&validator).unwrap();
//! assert_eq!(record.name, "Ana Silva");
//! assert_eq!(record.email, "ana@gmail.com");
//!
//! session.techs_mut().remove_at(1);
//! let errors = session.submit(&validator).unwrap_err();
//! assert!(errors.contains("techs", ErrorKind::TooFew));
//! ```
//!
//! ## Rules
//!
//! - `avatar`: first file of the list is required and at most 10 MiB
//! - `name`: required after trimming, then capitalized per word
//! - `email`: required, well formed, lower-cased, must end in `@gmail.com`
//! - `password` / `confirmPassword`: at least 8 characters, and equal
//! - `techs`: at least 2 entries; each needs a title and a knowledge level
//!   from 1 to 100
//!
//! Copyright (c) 2025 Techform Team
//! Licensed under the Apache-2.0 license

pub mod collection;
pub mod record;
pub mod session;
pub mod validation;

// Re-export commonly used types for convenience
pub use collection::{CollectionEntry, EntryId, TechCollection, TechField};
pub use record::{FileHandle, NormalizedRecord, RawCandidateRecord, RawKnowledge, RawTech, Tech};
pub use session::{FormSession, ScalarField};
pub use validation::{
    create_signup_validator, validate_records_batch, ErrorKind, FieldError, FieldPath,
    SchemaLimits, SchemaValidator, SignupDraft, SignupSchema, ValidationConfig, ValidationContext,
    ValidationErrors, ValidationMode, ValidationResult,
};
