//! # Validation Engine
//!
//! Matches a document against compiled [`ValidationNode`]s. Each node is
//! checked against a *scope*: the value enclosing it. A field node looks its
//! name up in the scope; root and element nodes take the scope itself.
//!
//! ## Matching rules
//!
//! 1. A missing or `null` value fails only if the node is required.
//! 2. A present value must have the node's type.
//! 3. Numbers must lie within the inclusive bounds.
//! 4. Strings pass the length gate first (in characters). A custom `regexp`
//!    then replaces the format checker; otherwise the checker, if any, runs.
//! 5. Objects check every field node against the object.
//! 6. Arrays check the element count, then require each element to match
//!    at least one element schema.
//! 7. Unions pass if any alternative accepts the same scope.
//!
//! Rejections are returned as [`ValidationError`] with the path from the
//! scope to the offending value. Only the first failing field is reported.

use serde_json::Value;

use djv_core::value::{self, as_wide_int, char_len, json_type};
use djv_core::{JsonType, ValidationError, Violation};

use crate::node::{Kind, NodeKind, NodeName, StringRule, ValidationNode};

/// Check `node` against `scope`.
///
/// Errors from a field node are prefixed with the field name.
pub fn check(node: &ValidationNode, scope: &Value) -> Result<(), ValidationError> {
    match &node.name {
        NodeName::Field(name) if name.is_empty() => Err(Violation::EmptyName.into()),
        NodeName::Field(name) => match_node(node, scope).map_err(|e| e.within_field(name)),
        NodeName::Root | NodeName::Element => match_node(node, scope),
    }
}

/// Check `scope` against each node in turn, stopping at the first that
/// accepts it. On failure every rejection is returned, in node order.
pub fn check_any(nodes: &[ValidationNode], scope: &Value) -> Result<(), Vec<ValidationError>> {
    first_match(nodes, |node| check(node, scope))
}

fn first_match<F>(nodes: &[ValidationNode], mut attempt: F) -> Result<(), Vec<ValidationError>>
where
    F: FnMut(&ValidationNode) -> Result<(), ValidationError>,
{
    let mut attempts = Vec::with_capacity(nodes.len());
    for node in nodes {
        match attempt(node) {
            Ok(()) => return Ok(()),
            Err(e) => attempts.push(e),
        }
    }
    Err(attempts)
}

fn match_node(node: &ValidationNode, scope: &Value) -> Result<(), ValidationError> {
    let Some(value) = value::observe(scope, node.name.field()) else {
        return if node.required {
            Err(Violation::Required.into())
        } else {
            Ok(())
        };
    };

    match &node.kind {
        NodeKind::Null => Ok(()),
        NodeKind::Int { min, max } => {
            let Some(actual) = as_wide_int(value) else {
                return Err(mismatch(Kind::Int, value));
            };
            if actual < i128::from(*min) || actual > i128::from(*max) {
                return Err(Violation::IntOutOfRange {
                    min: *min,
                    max: *max,
                    actual,
                }
                .into());
            }
            Ok(())
        }
        NodeKind::Float { min, max } => match value.as_f64() {
            Some(actual) if json_type(value) == JsonType::Float => float_in_range(actual, *min, *max),
            _ => Err(mismatch(Kind::Float, value)),
        },
        NodeKind::Number { min, max } => match value.as_f64() {
            Some(actual) => float_in_range(actual, *min, *max),
            None => Err(mismatch(Kind::Number, value)),
        },
        NodeKind::String(rule) => match value.as_str() {
            Some(s) => check_string(rule, s).map_err(ValidationError::from),
            None => Err(mismatch(Kind::String, value)),
        },
        NodeKind::Bool => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(mismatch(Kind::Bool, value))
            }
        }
        NodeKind::Object { fields } => {
            if !value.is_object() {
                return Err(mismatch(Kind::Object, value));
            }
            fields.iter().try_for_each(|field| check(field, value))
        }
        NodeKind::Array {
            min_len,
            max_len,
            items,
        } => {
            let Some(elements) = value.as_array() else {
                return Err(mismatch(Kind::Array, value));
            };
            let actual = elements.len();
            if actual < *min_len || actual > *max_len {
                return Err(Violation::SizeOutOfRange {
                    min: *min_len,
                    max: *max_len,
                    actual,
                }
                .into());
            }
            if items.is_empty() {
                return Ok(());
            }
            for (index, element) in elements.iter().enumerate() {
                check_any(items, element).map_err(|attempts| {
                    ValidationError::new(Violation::NoElementMatched { attempts }).within_index(index)
                })?;
            }
            Ok(())
        }
        // Alternatives carry the union's own name, so they are matched
        // without prefixing it a second time.
        NodeKind::Union { alternatives } => first_match(alternatives, |alt| match_node(alt, scope))
            .map_err(|attempts| Violation::NoAlternativeMatched { attempts }.into()),
    }
}

fn check_string(rule: &StringRule, s: &str) -> Result<(), Violation> {
    let actual = char_len(s);
    if actual < rule.min_len || actual > rule.max_len {
        return Err(Violation::LengthOutOfRange {
            min: rule.min_len,
            max: rule.max_len,
            actual,
        });
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(s) {
            return Err(Violation::PatternMismatch {
                pattern: pattern.as_str().to_string(),
            });
        }
        return Ok(());
    }

    if let Some(checker) = rule.checker {
        if !checker.check(s, rule.min_len, rule.max_len) {
            return Err(Violation::CheckerFailed {
                checker: checker.name(),
            });
        }
    }
    Ok(())
}

fn float_in_range(actual: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if actual < min || actual > max {
        return Err(Violation::FloatOutOfRange { min, max, actual }.into());
    }
    Ok(())
}

fn mismatch(expected: Kind, value: &Value) -> ValidationError {
    Violation::TypeMismatch {
        expected: expected.as_str(),
        actual: json_type(value),
    }
    .into()
}
