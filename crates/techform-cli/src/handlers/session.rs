//! Session replay command handler
//!
//! A session script is a JSON or YAML list of form actions. Each action is
//! applied to a [`FormSession`] in order; every `submit` validates the live
//! state and reports the outcome.

use super::utils::load_document;
use super::validate::write_errors;
use crate::cli::{OutputFormat, SessionArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::{Deserialize, Serialize};
use techform_schemas::{
    create_signup_validator, FileHandle, FormSession, NormalizedRecord, RawKnowledge, RawTech,
    ScalarField, SignupSchema, TechField, ValidationErrors,
};
use tracing::{debug, info, instrument};

/// One scripted form action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionStep {
    /// Type into a scalar input
    Set { field: ScalarField, value: String },
    /// Replace the avatar file list
    Avatar {
        #[serde(default)]
        files: Vec<FileHandle>,
    },
    /// Add a tech row at the end
    Append {
        #[serde(default)]
        title: String,
        #[serde(default)]
        knowledge: RawKnowledge,
    },
    /// Add a tech row before `position`
    Insert {
        position: usize,
        #[serde(default)]
        title: String,
        #[serde(default)]
        knowledge: RawKnowledge,
    },
    /// Edit the row currently at `position`
    Edit {
        position: usize,
        title: Option<String>,
        knowledge: Option<RawKnowledge>,
    },
    /// Remove the row at `position`; out of bounds is a no-op
    RemoveAt { position: usize },
    /// Move a row; out of bounds is a no-op
    Move { from: usize, to: usize },
    /// Validate the live state
    Submit,
    /// Clear the whole form
    Reset,
}

/// Outcome of one `submit` step
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    /// 1-based index of the step in the script
    pub step: usize,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<NormalizedRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

/// Everything a replay produced, for machine-readable output
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub steps: usize,
    pub submissions: Vec<SubmissionReport>,
}

/// Handle the session command
#[instrument(skip(config, output), fields(file = %args.script_file.display()))]
pub fn handle_session(args: SessionArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("session_command", &format!("file: {}", args.script_file.display()));
    output.info(&format!("Replaying session: {}", args.script_file.display()))?;

    let steps: Vec<SessionStep> = load_document(&args.script_file)?;
    info!(steps = steps.len(), "session script loaded");

    let report = replay(&steps, config, args.fail_fast, output)?;

    if output.format() == OutputFormat::Human {
        output.section("Summary")?;
        let rows = report
            .submissions
            .iter()
            .map(|submission| {
                let result = match &submission.errors {
                    Some(errors) => format!("rejected ({} error(s))", errors.len()),
                    None => "accepted".to_string(),
                };
                vec![submission.step.to_string(), result]
            })
            .collect();
        output.table(&["Step", "Result"], rows)?;
    } else {
        output.data(&report)?;
    }

    if args.fail_fast {
        if let Some(errors) = report.submissions.iter().find_map(|s| s.errors.clone()) {
            return Err(Error::Validation(errors));
        }
    }

    Ok(())
}

/// Apply every step to a fresh session, collecting each submission outcome
pub fn replay(
    steps: &[SessionStep],
    config: &Config,
    fail_fast: bool,
    output: &mut OutputWriter,
) -> Result<SessionReport> {
    let validator = create_signup_validator();
    let mut session = FormSession::new();
    let mut submissions = Vec::new();

    for (index, step) in steps.iter().enumerate() {
        let number = index + 1;
        debug!(step = number, ?step, "applying session step");

        if let SessionStep::Submit = step {
            let submission = submit(&mut session, &validator, number, config, output)?;
            let rejected = !submission.accepted;
            submissions.push(submission);
            if rejected && fail_fast {
                break;
            }
        } else {
            apply(&mut session, step, number)?;
        }
    }

    Ok(SessionReport {
        steps: steps.len(),
        submissions,
    })
}

/// Apply one editing step
fn apply(session: &mut FormSession, step: &SessionStep, number: usize) -> Result<()> {
    match step {
        SessionStep::Set { field, value } => session.set(*field, value.clone()),
        SessionStep::Avatar { files } => session.set_avatar(files.clone()),
        SessionStep::Append { title, knowledge } => {
            session.techs_mut().append(RawTech::new(title.clone(), knowledge.clone()));
        }
        SessionStep::Insert {
            position,
            title,
            knowledge,
        } => {
            session
                .techs_mut()
                .insert_at(*position, RawTech::new(title.clone(), knowledge.clone()));
        }
        SessionStep::Edit {
            position,
            title,
            knowledge,
        } => {
            let id = session
                .techs()
                .id_at(*position)
                .ok_or_else(|| Error::invalid_step(number, format!("no tech at position {}", position)))?;
            if let Some(title) = title {
                session.techs_mut().set_title(id, title.clone());
            }
            if let Some(knowledge) = knowledge {
                session.techs_mut().set_knowledge(id, knowledge.clone());
            }
        }
        SessionStep::RemoveAt { position } => {
            if session.techs_mut().remove_at(*position).is_none() {
                debug!(step = number, position, "remove_at ignored");
            }
        }
        SessionStep::Move { from, to } => {
            if !session.techs_mut().move_entry(*from, *to) {
                debug!(step = number, from, to, "move ignored");
            }
        }
        SessionStep::Reset => session.reset(),
        SessionStep::Submit => {}
    }
    Ok(())
}

/// Validate the live state and print the outcome
fn submit(
    session: &mut FormSession,
    validator: &SignupSchema,
    number: usize,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<SubmissionReport> {
    let human = output.format() == OutputFormat::Human;
    if human {
        output.section(&format!("Submission at step {}", number))?;
    }

    match session.submit(validator) {
        Ok(record) => {
            if human {
                output.success("✓ Submission accepted")?;
                output.data(&record)?;
            }
            Ok(SubmissionReport {
                step: number,
                accepted: true,
                record: Some(record),
                errors: None,
            })
        }
        Err(errors) => {
            if human {
                output.error("✗ Submission rejected")?;
                write_errors(output, &errors, config.validation.max_errors)?;
                if output.is_verbose() {
                    write_entry_errors(session, output)?;
                }
            }
            Ok(SubmissionReport {
                step: number,
                accepted: false,
                record: None,
                errors: Some(errors),
            })
        }
    }
}

/// Per-row view of the latest errors, keyed by each row's input binding
fn write_entry_errors(session: &FormSession, output: &mut OutputWriter) -> Result<()> {
    for entry in session.techs().current_entries() {
        let errors = session.entry_errors(entry.id);
        if errors.is_empty() {
            continue;
        }

        let binding = session
            .techs()
            .field_name_of(entry.id, TechField::Title)
            .unwrap_or_default();
        output.debug(&format!("{} ({})", entry.id, binding))?;
        for error in errors {
            output.field_error(error)?;
        }
    }
    Ok(())
}
