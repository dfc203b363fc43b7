#![deny(missing_docs)]

//! # djv-core: Foundational Types for djv
//!
//! Leaf crate of the djv workspace. It defines the vocabulary every other
//! crate speaks: how a parsed JSON value is observed, how failures are
//! reported, and how a validator is configured.
//!
//! ## Modules
//!
//! - [`value`]: thin adapter over `serde_json::Value`: type tags, field
//!   lookup relative to an enclosing value, and typed accessors with
//!   defaults used when reading schema objects.
//! - [`error`]: [`SchemaError`] for compile-time failures and
//!   [`ValidationError`] for path-qualified document rejections.
//! - [`config`]: [`ValidatorConfig`], the explicit configuration threaded
//!   into the schema compiler (maximum string length, nesting limit,
//!   compile-failure policy).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `djv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod value;

pub use config::{ConfigError, FailurePolicy, ValidatorConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_STRING_LEN};
pub use error::{PathSegment, SchemaError, ValidationError, Violation};
pub use value::JsonType;
