//! Validation demonstration example
//!
//! Copyright (c) 2025 Techform Team
//! Licensed under the Apache-2.0 license

use serde_json::json;
use techform_schemas::{
    create_signup_validator, FileHandle, FormSession, RawCandidateRecord, RawTech, ScalarField,
    SchemaValidator, TechField,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Techform Sign-up Validation Demo ===\n");

    demo_record_validation()?;

    println!();

    demo_form_session();

    Ok(())
}

fn demo_record_validation() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Record Validation Demo ---");

    let validator = create_signup_validator();

    let record = RawCandidateRecord::from_json(json!({
        "avatar": [{ "name": "ana.jpg", "size": 3145728, "type": "image/jpeg" }],
        "name": "  ana silva ",
        "email": "ANA@gmail.com",
        "password": "12345678",
        "confirmPassword": "12345678",
        "techs": [
            { "title": "Go", "knowledge": "50" },
            { "title": "Rust", "knowledge": 80 }
        ]
    }))?;

    println!("✅ Validating a complete record:");
    match validator.validate(&record) {
        Ok(normalized) => println!("{}", serde_json::to_string_pretty(&normalized)?),
        Err(e) => println!("   Error: {}", e),
    }

    let mut mismatched = record.clone();
    mismatched.confirm_password = "87654321".to_string();

    println!("\n❌ Validating with a mismatched confirmation:");
    if let Err(errors) = validator.validate(&mismatched) {
        for error in &errors {
            println!("   {} [{}]: {}", error.path, error.kind.code(), error.message);
        }
    }

    println!("\n🔍 Same record in basic mode (refinements skipped):");
    match validator.validate_basic(&mismatched) {
        Ok(_) => println!("   Valid!"),
        Err(e) => println!("   Error: {}", e),
    }

    Ok(())
}

fn demo_form_session() {
    println!("--- Form Session Demo ---");

    let validator = create_signup_validator();
    let mut session = FormSession::new();
    session.set_avatar(vec![FileHandle::new("me.png", 2048)]);
    session.set(ScalarField::Name, "joão");
    session.set(ScalarField::Email, "joao@gmail.com");
    session.set(ScalarField::Password, "password1");
    session.set(ScalarField::ConfirmPassword, "password1");

    let go = session.techs_mut().append(RawTech::new("Go", "50"));
    let blank = session.techs_mut().append_default();
    let rust = session.techs_mut().append(RawTech::new("Rust", "150"));

    println!("Submitting with a blank row and an out-of-range level:");
    if let Err(errors) = session.submit(&validator) {
        println!("   {} error(s)", errors.len());
    }
    for id in [go, blank, rust] {
        let binding = session.techs().field_name_of(id, TechField::Title).unwrap_or_default();
        for error in session.entry_errors(id) {
            println!("   {} ({}): {}", id, binding, error.message);
        }
    }

    session.techs_mut().remove(blank);
    session.techs_mut().set_knowledge(rust, "90");

    println!("\nAfter removing the blank row and fixing the level:");
    match session.submit(&validator) {
        Ok(record) => println!("   ✅ accepted {} with {} techs", record.name, record.techs.len()),
        Err(e) => println!("   Error: {}", e),
    }
}
