//! # djv-cli: djv Command-Line Interface
//!
//! A clap-based front end over `djv-schema`.
//!
//! ## Subcommands
//!
//! - `validate`: validate JSON or YAML documents against a schema
//! - `check-schema`: compile a schema and report its shape or error
//! - `formats`: list the format registry
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `djv-schema`; no matching logic here.
//! - Results go to stdout, one line per document; logs go to stderr.

pub mod check_schema;
pub mod document;
pub mod formats;
pub mod validate;
