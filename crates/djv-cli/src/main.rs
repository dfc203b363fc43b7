//! # djv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use djv_cli::check_schema::{run_check_schema, CheckSchemaArgs};
use djv_cli::formats::{run_formats, FormatsArgs};
use djv_cli::validate::{run_validate, ValidateArgs};

/// djv: validate JSON documents against a compact JSON-encoded schema DSL.
#[derive(Parser, Debug)]
#[command(name = "djv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate documents against a schema.
    Validate(ValidateArgs),

    /// Compile a schema and report its root shape or compile error.
    CheckSchema(CheckSchemaArgs),

    /// List every format name with its kind, bounds, and checker.
    Formats(FormatsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::CheckSchema(args) => run_check_schema(&args),
        Commands::Formats(args) => run_formats(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_validate_documents() {
        let cli = Cli::try_parse_from([
            "djv",
            "validate",
            "--schema",
            "s.json",
            "-d",
            "a.json",
            "--document",
            "b.yaml",
        ])
        .unwrap();
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.schema, PathBuf::from("s.json"));
        assert_eq!(
            args.documents,
            vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]
        );
        assert!(!args.fail_closed);
        assert!(args.max_string_len.is_none());
    }

    #[test]
    fn cli_parse_validate_stdin_with_overrides() {
        let cli = Cli::try_parse_from([
            "djv",
            "-vv",
            "validate",
            "--schema",
            "s.json",
            "--max-string-len",
            "64",
            "--fail-closed",
            "--explain",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert!(args.documents.is_empty());
        assert_eq!(args.max_string_len, Some(64));
        assert!(args.fail_closed);
        assert!(args.explain);
    }

    #[test]
    fn cli_parse_validate_requires_schema() {
        assert!(Cli::try_parse_from(["djv", "validate", "-d", "a.json"]).is_err());
    }

    #[test]
    fn cli_parse_check_schema() {
        let cli = Cli::try_parse_from(["djv", "check-schema", "s.json", "--tree"]).unwrap();
        let Commands::CheckSchema(args) = cli.command else {
            panic!("expected check-schema");
        };
        assert_eq!(args.schema, PathBuf::from("s.json"));
        assert!(args.tree);
        assert!(args.config.is_none());
    }

    #[test]
    fn cli_parse_formats() {
        let cli = Cli::try_parse_from(["djv", "formats"]).unwrap();
        assert!(matches!(cli.command, Commands::Formats(_)));
    }

    #[test]
    fn cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["djv", "lint"]).is_err());
    }
}
