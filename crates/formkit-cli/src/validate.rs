//! # Validate Subcommand
//!
//! Validates a JSON or YAML document against a form definition.
//!
//! ```bash
//! formkit validate --form signup.yaml --input submission.json
//! formkit validate --form signup.yaml --input submission.yaml --all --json
//! formkit validate --form password.yaml --input change.json --context ctx.json
//! ```
//!
//! Without `--context`, the document itself is the validation context, so a
//! confirm-password field sees the `newPassword` submitted alongside it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use formkit_core::ValidationContext;
use formkit_schema::{load_document, FormDefinition, FormValidationError, Violation};

use crate::{EXIT_INVALID, EXIT_OK};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Form definition file (`.yaml`, `.yml` or `.json`).
    #[arg(long)]
    pub form: PathBuf,

    /// Document to validate (`.yaml`, `.yml` or `.json`).
    #[arg(long)]
    pub input: PathBuf,

    /// Validation context file. Defaults to the document itself.
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Report every failing field instead of stopping at the first.
    #[arg(long)]
    pub all: bool,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Outcome of validating one document.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub form: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

/// Load the definition, document and context named by `args` and validate.
///
/// # Errors
///
/// Fails when a file cannot be read or parsed, the definition does not
/// build, or the document is not an object. An invalid document is not an
/// error; it yields a report with `valid == false`.
pub fn validate_files(args: &ValidateArgs) -> Result<ValidationReport> {
    let definition = FormDefinition::load(&args.form)
        .with_context(|| format!("loading form definition {}", args.form.display()))?;
    let form = definition
        .into_schema()
        .with_context(|| format!("building form from {}", args.form.display()))?;
    let document = load_document(&args.input)
        .with_context(|| format!("loading document {}", args.input.display()))?;

    let context_value = match &args.context {
        Some(path) => load_document(path)
            .with_context(|| format!("loading context {}", path.display()))?,
        None => document.clone(),
    };
    let context = ValidationContext::from_value(context_value)?;

    tracing::info!(
        form = %form.name(),
        fields = form.len(),
        context_keys = context.len(),
        "validating {}",
        args.input.display()
    );

    let result = if args.all {
        form.validate_all(&document, &context)
    } else {
        form.validate(&document, &context)
    };

    match result {
        Ok(values) => Ok(ValidationReport {
            form: form.name().to_string(),
            valid: true,
            values: Some(values.to_json()),
            violations: Vec::new(),
        }),
        Err(FormValidationError::ValidationFailed { form, violations }) => Ok(ValidationReport {
            form,
            valid: false,
            values: None,
            violations: violations.into_inner(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let report = validate_files(args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.valid {
        println!("OK: {} is a valid '{}' document", args.input.display(), report.form);
    } else {
        println!(
            "FAIL: {} has {} invalid field(s) for '{}'",
            args.input.display(),
            report.violations.len(),
            report.form
        );
        for violation in &report.violations {
            println!("{violation}");
        }
    }

    Ok(if report.valid { EXIT_OK } else { EXIT_INVALID })
}
