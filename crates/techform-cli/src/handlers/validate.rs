//! Validation command handler

use super::utils::load_document;
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use techform_schemas::{
    create_signup_validator, RawCandidateRecord, SchemaValidator, ValidationContext,
    ValidationErrors, ValidationMode,
};
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.record_file.display(), mode = ?args.mode))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("file: {}", args.record_file.display()));
    info!("Starting validation process");
    output.info(&format!("Validating record: {}", args.record_file.display()))?;

    let record: RawCandidateRecord = load_document(&args.record_file)?;

    let mode: ValidationMode = args.mode.unwrap_or(config.validation.mode).into();
    debug!("Using validation mode: {:?}", mode);
    output.debug(&format!("Validation mode: {:?}", mode))?;

    let result = {
        let _validation_timer = Timer::new("schema_validation");
        create_signup_validator().validate_with_context(&record, &ValidationContext::new(mode))
    };

    match result {
        Ok(normalized) => {
            info!("Validation completed successfully");
            output.success("✓ Record is valid")?;

            if args.detailed {
                output.section("Submitted Record")?;
                output.data(&record)?;
            }

            output.section("Normalized Record")?;
            output.data(&normalized)?;
            Ok(())
        }
        Err(errors) => {
            warn!("Validation failed with {} error(s)", errors.len());
            output.error("✗ Record validation failed")?;

            if args.detailed {
                output.section("Submitted Record")?;
                output.data(&record)?;
            }

            write_errors(output, &errors, config.validation.max_errors)?;
            Err(Error::Validation(errors))
        }
    }
}

/// Print an error set, capped at `max_errors` when non-zero
pub(crate) fn write_errors(output: &mut OutputWriter, errors: &ValidationErrors, max_errors: usize) -> Result<()> {
    if max_errors > 0 && errors.len() > max_errors {
        let mut shown = errors.clone();
        shown.truncate(max_errors);
        output.validation_errors(&shown)?;
        output.warning(&format!("{} more error(s) not shown", errors.len() - max_errors))
    } else {
        output.validation_errors(errors)
    }
}
