//! # djv-schema: Schema Compiler & Validation Engine
//!
//! Compiles the JSON-encoded schema DSL into a tree of validation nodes and
//! matches documents against it.
//!
//! ## Format Registry (`formats`, `checkers`)
//!
//! [`Format`] enumerates every type name the DSL recognizes (`INT`,
//! `NONEMPTY.STRING`, `EMAIL`, `HEX256.IF.EXIST`, ...). Each name maps to a
//! [`FormatDescriptor`] giving the node kind, default bounds, and the
//! semantic [`Checker`] it runs, if any.
//!
//! ## Compilation (`compile`)
//!
//! [`compile()`] parses schema text and builds [`ValidationNode`]s. The
//! schema root may be an object, a bare format name, or an array of
//! alternatives ([`RootShape`]).
//!
//! ## Validation (`engine`, `validator`)
//!
//! [`engine::check`] is the single matching routine. [`Validator`] wraps
//! compile and validate behind a small API:
//!
//! - [`Validator::compile`] / [`Validator::try_compile`]
//! - [`Validator::is_valid`]: accept or reject
//! - [`Validator::is_valid_with_error`]: the first rejection with its path
//!
//! ## Crate Policy
//!
//! - Depends only on `djv-core` internally.
//! - Never panics on schema text or documents; failures are values.
//! - Compiled schemas are immutable and may be shared across threads.

pub mod checkers;
pub mod compile;
pub mod engine;
pub mod formats;
pub mod node;
pub mod validator;

pub use checkers::Checker;
pub use compile::{compile, compile_value, CompiledSchema, RootShape};
pub use formats::{DefaultBounds, Format, FormatDescriptor, LengthLimit, MAX_SAFE_INTEGER};
pub use node::{Kind, NodeKind, NodeName, StringRule, ValidationNode};
pub use validator::Validator;

pub use djv_core::{
    FailurePolicy, PathSegment, SchemaError, ValidationError, ValidatorConfig, Violation,
};
