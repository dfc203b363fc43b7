//! # Validate Subcommand
//!
//! Compiles a schema and validates one or more documents against it.
//!
//! ```bash
//! djv validate --schema patient.schema.json --document a.json --document b.yaml
//! cat doc.json | djv validate --schema patient.schema.json
//! ```
//!
//! Each document produces one line on stdout, `OK <path>` or
//! `FAIL <path>: <diagnostic>`. The exit code is 1 if any document fails.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use djv_core::{FailurePolicy, ValidationError, ValidatorConfig, Violation};
use djv_schema::Validator;

use crate::document;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (JSON).
    #[arg(long, short)]
    pub schema: PathBuf,

    /// Document to validate (JSON or YAML). Repeatable; stdin if omitted.
    #[arg(long = "document", short = 'd')]
    pub documents: Vec<PathBuf>,

    /// Validator configuration file (YAML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Default maximum length of string-family formats.
    #[arg(long)]
    pub max_string_len: Option<usize>,

    /// Reject every document if the schema fails to compile.
    #[arg(long)]
    pub fail_closed: bool,

    /// Print the rejections of every union alternative tried.
    #[arg(long)]
    pub explain: bool,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let config = build_config(args.config.as_deref(), args.max_string_len, args.fail_closed)?;
    let validator = load_validator(&args.schema, config)?;

    let mut failed = 0usize;
    if args.documents.is_empty() {
        let outcome = document::read_stdin().map(|doc| validator.is_valid_with_error(&doc));
        failed += report("-", outcome, args.explain);
    } else {
        for path in &args.documents {
            let outcome = document::load_document(path).map(|doc| validator.is_valid_with_error(&doc));
            failed += report(&path.display().to_string(), outcome, args.explain);
        }
    }

    tracing::debug!(failed, "validation finished");
    Ok(u8::from(failed > 0))
}

/// Resolve the validator configuration: the config file (if any), then
/// command-line overrides.
pub fn build_config(
    config_path: Option<&Path>,
    max_string_len: Option<usize>,
    fail_closed: bool,
) -> Result<ValidatorConfig> {
    let mut config = match config_path {
        Some(path) => ValidatorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ValidatorConfig::default(),
    };
    if let Some(max) = max_string_len {
        config = config.with_max_string_len(max);
    }
    if fail_closed {
        config = config.with_failure_policy(FailurePolicy::FailClosed);
    }
    Ok(config)
}

/// Read and compile the schema file.
///
/// A schema that does not compile is an error. Under a fail-closed config
/// the empty validator is returned instead, so every document is reported
/// as failed.
pub fn load_validator(schema_path: &Path, config: ValidatorConfig) -> Result<Validator> {
    let text = std::fs::read_to_string(schema_path)
        .with_context(|| format!("failed to read schema {}", schema_path.display()))?;

    let mut validator = Validator::with_config(config);
    if let Err(e) = validator.try_compile(&text) {
        if validator.config().is_fail_closed() {
            tracing::warn!(schema = %schema_path.display(), error = %e, "schema rejected; every document will fail");
        } else {
            return Err(e).with_context(|| format!("invalid schema {}", schema_path.display()));
        }
    }
    Ok(validator)
}

/// Print the outcome for one document and return 1 if it failed.
fn report(label: &str, outcome: Result<Result<(), ValidationError>>, explain: bool) -> usize {
    match outcome {
        Ok(Ok(())) => {
            println!("OK {label}");
            0
        }
        Ok(Err(e)) => {
            println!("FAIL {label}: {e}");
            if explain {
                for line in explain_lines(&e) {
                    println!("{line}");
                }
            }
            1
        }
        Err(e) => {
            println!("FAIL {label}: {e:#}");
            1
        }
    }
}

/// Indented listing of the rejections nested inside a union, element, or
/// root failure.
pub fn explain_lines(error: &ValidationError) -> Vec<String> {
    let mut lines = Vec::new();
    push_attempts(error, 1, &mut lines);
    lines
}

fn push_attempts(error: &ValidationError, depth: usize, lines: &mut Vec<String>) {
    let attempts = match error.violation() {
        Violation::NoAlternativeMatched { attempts }
        | Violation::NoElementMatched { attempts }
        | Violation::NoRootMatched { attempts } => attempts,
        _ => return,
    };
    for (i, attempt) in attempts.iter().enumerate() {
        lines.push(format!("{}#{}: {attempt}", "  ".repeat(depth), i + 1));
        push_attempts(attempt, depth + 1, lines);
    }
}
