// Tests for output formatting
//
// These tests verify human and machine rendering of validation errors,
// credential masking and the table helper.

use super::*;
use super::test_support::capture as writer;
use techform_schemas::validation::Violation;
use techform_schemas::{ErrorKind, FieldPath};

fn sample_errors() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(FieldError::with_violations(
        FieldPath::field("techs"),
        ErrorKind::TooFew,
        "At least 2 techs are required",
        vec![Violation::new("too_few", "at least 2 entries", "1 entries")],
    ));
    errors.add(FieldError::new(
        FieldPath::field("techs").child_index(0).child("title"),
        ErrorKind::Required,
        "Title is required",
    ));
    errors
}

#[test]
fn test_validation_errors_human() {
    let formatted = format_validation_errors_human(&sample_errors());

    assert!(formatted.contains("❌ Validation Failed - 2 Error(s)"));
    assert!(formatted.contains("1. 📍 Path: techs\n"));
    assert!(formatted.contains("🏷️  Kind: too_few"));
    assert!(formatted.contains("  • Rule: too_few"));
    assert!(formatted.contains("    Expected: at least 2 entries"));
    assert!(formatted.contains("2. 📍 Path: techs[0].title"));
    assert!(formatted.contains("💬 Message: Title is required"));
}

#[test]
fn test_validation_errors_machine_formats() {
    let errors = sample_errors();

    let json = OutputFormat::Json.format_validation_errors(&errors).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["errors"][1]["path"], serde_json::json!(["techs", 0, "title"]));
    assert_eq!(value["errors"][1]["kind"], "required");

    let yaml = OutputFormat::Yaml.format_validation_errors(&errors).unwrap();
    assert!(yaml.contains("kind: too_few"));

    let pretty = OutputFormat::JsonPretty.format_field_error(&errors.errors[0]).unwrap();
    assert!(pretty.contains("\n  \"kind\": \"too_few\""));
}

#[test]
fn test_data_masks_passwords() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output
        .data(&serde_json::json!({ "name": "Ana", "password": "12345678" }))
        .unwrap();

    let written = buffer.contents();
    assert!(written.contains("\"password\":\"***\""));
    assert!(!written.contains("12345678"));
    assert!(written.ends_with('\n'));
}

#[test]
fn test_messages_suppressed_outside_human() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.info("hello").unwrap();
    output.success("done").unwrap();
    output.section("Section").unwrap();
    output.error("bad").unwrap();
    assert_eq!(buffer.contents(), "");
}

#[test]
fn test_quiet_keeps_errors() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("hello").unwrap();
    output.success("done").unwrap();
    output.error("bad").unwrap();
    assert_eq!(buffer.contents(), "ERROR: bad\n");
}

#[test]
fn test_table_rendering() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output
        .table(
            &["Step", "Result"],
            vec![
                vec!["1".to_string(), "accepted".to_string()],
                vec!["12".to_string(), "2 error(s)".to_string()],
            ],
        )
        .unwrap();

    let lines: Vec<_> = buffer.contents().lines().map(str::to_string).collect();
    assert_eq!(lines[0], "Step │ Result    ");
    assert_eq!(lines[1], "─────┼───────────");
    assert_eq!(lines[2], "1    │ accepted");
    assert_eq!(lines[3], "12   │ 2 error(s)");
}
