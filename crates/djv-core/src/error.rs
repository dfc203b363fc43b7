//! # Error Types: Compile and Validation Failures
//!
//! Two families of errors, both derived with `thiserror`:
//!
//! - [`SchemaError`]: the schema text could not be compiled.
//! - [`ValidationError`]: a document was rejected. Carries the path of the
//!   offending field (relative to the document root) and a [`Violation`]
//!   describing what went wrong.
//!
//! Validation outcomes are values, never panics. Only the first rejection
//! found is reported; union and array-element failures keep the rejections
//! of every alternative they tried in `attempts`.

use std::fmt;

use thiserror::Error;

use crate::value::JsonType;

/// Error raised while compiling schema text.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema text is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The schema root is neither an object, a format name, nor an array.
    #[error("schema root must be an object, a format name, or an array of alternatives, found {found}")]
    UnsupportedRoot {
        /// Type of the offending root.
        found: JsonType,
    },

    /// Schema nesting exceeded the configured limit.
    #[error("schema nesting exceeds the maximum depth of {max_depth}")]
    TooDeep {
        /// Configured limit.
        max_depth: usize,
    },
}

/// One step of the path from the document root to a rejected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object field.
    Field(String),
    /// Array element position.
    Index(usize),
}

/// Reason a document was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    /// Observed type differs from the schema type.
    #[error("type must be {expected} but is {actual}")]
    TypeMismatch {
        /// Expected kind name.
        expected: &'static str,
        /// Observed type.
        actual: JsonType,
    },

    /// Integer outside the inclusive bounds.
    #[error("out of range: must be between {min} and {max} but is {actual}")]
    IntOutOfRange {
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
        /// Observed value.
        actual: i128,
    },

    /// Float outside the inclusive bounds.
    #[error("out of range: must be between {min} and {max} but is {actual}")]
    FloatOutOfRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Observed value.
        actual: f64,
    },

    /// String length (in characters) outside the inclusive bounds.
    #[error("length out of range: must be {min} to {max} characters but is {actual} characters")]
    LengthOutOfRange {
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// Array element count outside the inclusive bounds.
    #[error("array length out of range: must be {min} to {max} elements but is {actual}")]
    SizeOutOfRange {
        /// Minimum element count.
        min: usize,
        /// Maximum element count.
        max: usize,
        /// Observed element count.
        actual: usize,
    },

    /// A required value is absent or `null`.
    #[error("required field is missing")]
    Required,

    /// A `regexp` constraint did not match.
    #[error("does not match regexp `{pattern}`")]
    PatternMismatch {
        /// Source of the pattern.
        pattern: String,
    },

    /// A named format checker rejected the value.
    #[error("{checker} check failed")]
    CheckerFailed {
        /// Checker name.
        checker: &'static str,
    },

    /// No alternative of a union accepted the value.
    #[error("matched none of {} alternatives", .attempts.len())]
    NoAlternativeMatched {
        /// Rejection from each alternative, in schema order.
        attempts: Vec<ValidationError>,
    },

    /// An array element matched none of the element schemas.
    #[error("element matched none of {} element schemas", .attempts.len())]
    NoElementMatched {
        /// Rejection from each element schema.
        attempts: Vec<ValidationError>,
    },

    /// The document matched none of the root alternatives.
    #[error("document matched none of {} root schemas", .attempts.len())]
    NoRootMatched {
        /// Rejection from each root alternative.
        attempts: Vec<ValidationError>,
    },

    /// A field schema with an empty name cannot be resolved.
    #[error("malformed schema node: empty field name")]
    EmptyName,

    /// No document was supplied but the schema has constraints.
    #[error("empty document against a non-empty schema")]
    EmptyDocument,

    /// The validator is fail-closed and holds no compiled schema.
    #[error("validator has no compiled schema")]
    NotCompiled,
}

/// A rejected document: the path to the first offending value plus the
/// reason it was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}: {violation}", render_path(.path))]
pub struct ValidationError {
    path: Vec<PathSegment>,
    violation: Violation,
}

impl ValidationError {
    /// Create an error located at the current value (empty path).
    pub fn new(violation: Violation) -> Self {
        Self {
            path: Vec::new(),
            violation,
        }
    }

    /// Prepend an object field to the path.
    pub fn within_field(mut self, name: &str) -> Self {
        self.path.insert(0, PathSegment::Field(name.to_string()));
        self
    }

    /// Prepend an array position to the path.
    pub fn within_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    /// Path segments from the document root.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Rendered path, e.g. `patient.tel` or `skill[1]`; `(root)` if empty.
    pub fn path_string(&self) -> String {
        render_path(&self.path)
    }

    /// Reason for the rejection.
    pub fn violation(&self) -> &Violation {
        &self.violation
    }

    /// Consume the error, returning its violation.
    pub fn into_violation(self) -> Violation {
        self.violation
    }
}

impl From<Violation> for ValidationError {
    fn from(violation: Violation) -> Self {
        Self::new(violation)
    }
}

fn render_path(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return "(root)".to_string();
    }
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Field(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            PathSegment::Index(i) => {
                out.push_str(&format!("[{i}]"));
            }
        }
    }
    out
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}
