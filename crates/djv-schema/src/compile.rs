//! # Schema Compiler
//!
//! Turns schema text (itself JSON) into a tree of [`ValidationNode`]s.
//!
//! ## Root shapes
//!
//! - object: a single schema (`{"type": "OBJECT", ...}`)
//! - string: a bare format name (`"EMAIL"`)
//! - array: alternative schemas; a document must match at least one
//!
//! Any other root is rejected with [`SchemaError::UnsupportedRoot`].
//!
//! ## Node compilation
//!
//! Dispatch is on the JSON shape of each schema value. A string is a format
//! name resolved through the [`Format`] registry. An array is a union
//! whose alternatives bind to the same name. An object is a declaration
//! with `type`, `required`, `regexp`, bounds, and nested `object` / `array`
//! schemas. Unknown format names and non-schema values (numbers, bools,
//! null) compile to an inert node that accepts anything. A `regexp` that
//! does not compile is dropped with a warning; the rest of the declaration
//! still applies.
//!
//! The configured maximum string length and nesting limit come from the
//! [`ValidatorConfig`] passed in; the compiler reads no global state.

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use djv_core::value::{self, json_type};
use djv_core::{SchemaError, ValidatorConfig};

use crate::formats::{DefaultBounds, Format, FormatDescriptor, MAX_SAFE_INTEGER};
use crate::node::{Kind, NodeKind, NodeName, StringRule, ValidationNode};

/// JSON shape of the schema root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootShape {
    /// A single object-form schema.
    Object,
    /// A bare format name.
    Alias,
    /// A list of alternative schemas.
    Alternatives,
}

/// Output of a successful compile: the parsed schema, its root shape, and
/// the root alternatives.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    source: Value,
    shape: RootShape,
    roots: Vec<ValidationNode>,
}

impl CompiledSchema {
    /// The parsed schema text.
    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn shape(&self) -> RootShape {
        self.shape
    }

    /// Root alternatives. Exactly one for [`RootShape::Object`] and
    /// [`RootShape::Alias`]; any number for [`RootShape::Alternatives`].
    pub fn roots(&self) -> &[ValidationNode] {
        &self.roots
    }
}

/// Parse and compile schema text.
///
/// # Errors
///
/// - [`SchemaError::Parse`] if the text is not JSON.
/// - [`SchemaError::UnsupportedRoot`] if the root is not an object, string, or array.
/// - [`SchemaError::TooDeep`] if nesting exceeds `config.max_depth`.
pub fn compile(schema_text: &str, config: &ValidatorConfig) -> Result<CompiledSchema, SchemaError> {
    let source: Value = serde_json::from_str(schema_text)?;
    compile_value(source, config)
}

/// Compile an already-parsed schema.
pub fn compile_value(source: Value, config: &ValidatorConfig) -> Result<CompiledSchema, SchemaError> {
    let compiler = Compiler { config };

    let (shape, roots) = match &source {
        Value::Object(_) => (
            RootShape::Object,
            vec![compiler.build_node(NodeName::Root, &source, 1)?],
        ),
        Value::String(_) => (
            RootShape::Alias,
            vec![compiler.build_node(NodeName::Root, &source, 1)?],
        ),
        Value::Array(alternatives) => (
            RootShape::Alternatives,
            alternatives
                .iter()
                .map(|alt| compiler.build_node(NodeName::Root, alt, 1))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        other => {
            return Err(SchemaError::UnsupportedRoot {
                found: json_type(other),
            })
        }
    };

    debug!(shape = ?shape, roots = roots.len(), "schema compiled");
    Ok(CompiledSchema {
        source,
        shape,
        roots,
    })
}

struct Compiler<'a> {
    config: &'a ValidatorConfig,
}

impl Compiler<'_> {
    fn build_node(
        &self,
        name: NodeName,
        schema: &Value,
        depth: usize,
    ) -> Result<ValidationNode, SchemaError> {
        if depth > self.config.max_depth {
            return Err(SchemaError::TooDeep {
                max_depth: self.config.max_depth,
            });
        }

        match schema {
            Value::String(type_name) => self.build_alias(name, type_name, depth),
            Value::Array(alternatives) => {
                let alternatives = alternatives
                    .iter()
                    .map(|alt| self.build_node(name.clone(), alt, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ValidationNode::new(
                    name,
                    false,
                    NodeKind::Union { alternatives },
                ))
            }
            Value::Object(_) => self.build_declaration(name, schema, depth),
            _ => Ok(ValidationNode::new(name, false, NodeKind::Null)),
        }
    }

    fn build_alias(
        &self,
        name: NodeName,
        type_name: &str,
        depth: usize,
    ) -> Result<ValidationNode, SchemaError> {
        let Some(format) = Format::from_name(type_name) else {
            warn!(%name, type_name, "unknown format name; field is unconstrained");
            return Ok(ValidationNode::new(name, false, NodeKind::Null));
        };
        if format == Format::MinMaxString {
            warn!(%name, "MIN.MAX.STRING needs an object form with min/max; field is unconstrained");
            return Ok(ValidationNode::new(name, false, NodeKind::Null));
        }
        let kind = self.instantiate(format, None, None, &name, depth)?;
        Ok(ValidationNode::new(name, false, kind))
    }

    fn build_declaration(
        &self,
        name: NodeName,
        decl: &Value,
        depth: usize,
    ) -> Result<ValidationNode, SchemaError> {
        let required = value::bool_field(decl, "required", false);

        let pattern = match value::str_field(decl, "regexp") {
            Some(p) if !p.is_empty() => match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(%name, error = %e, "invalid regexp ignored");
                    None
                }
            },
            _ => None,
        };

        let type_name = value::str_field(decl, "type").unwrap_or_default();
        let kind = match Format::from_name(type_name) {
            Some(format) => self.instantiate(format, Some(decl), pattern, &name, depth)?,
            None => {
                if !type_name.is_empty() {
                    warn!(%name, type_name, "unknown format name; field is unconstrained");
                }
                NodeKind::Null
            }
        };

        Ok(ValidationNode::new(name, required, kind))
    }

    /// Build the constraints of `format`. `decl` is the object-form
    /// declaration, if any; its bounds are only read for overridable
    /// formats, its `object` / `array` sub-schemas always.
    fn instantiate(
        &self,
        format: Format,
        decl: Option<&Value>,
        pattern: Option<Regex>,
        name: &NodeName,
        depth: usize,
    ) -> Result<NodeKind, SchemaError> {
        let desc = format.descriptor();
        let overrides = decl.filter(|_| desc.overridable);

        let (kind, inverted) = match desc.kind {
            Kind::Int => {
                let (min, max) = int_bounds(&desc, overrides);
                (NodeKind::Int { min, max }, min > max)
            }
            Kind::Float | Kind::Number => {
                let (min, max) = float_bounds(&desc, overrides);
                let kind = if desc.kind == Kind::Float {
                    NodeKind::Float { min, max }
                } else {
                    NodeKind::Number { min, max }
                };
                (kind, min > max)
            }
            Kind::String => {
                let (min_len, max_len) = self.length_bounds(&desc, overrides);
                let rule = StringRule {
                    min_len,
                    max_len,
                    pattern,
                    checker: desc.checker,
                };
                (NodeKind::String(rule), min_len > max_len)
            }
            Kind::Array => {
                let (min_len, max_len) = self.length_bounds(&desc, overrides);
                let items = match decl.and_then(|d| d.get("array")) {
                    Some(items) => self.build_items(items, depth)?,
                    None => Vec::new(),
                };
                (
                    NodeKind::Array {
                        min_len,
                        max_len,
                        items,
                    },
                    min_len > max_len,
                )
            }
            Kind::Object => {
                let fields = match decl.and_then(|d| d.get("object")).and_then(Value::as_object) {
                    Some(map) => self.build_fields(map, depth)?,
                    None => Vec::new(),
                };
                (NodeKind::Object { fields }, false)
            }
            Kind::Bool => (NodeKind::Bool, false),
            Kind::Null | Kind::Union => (NodeKind::Null, false),
        };

        if inverted {
            warn!(%name, format = format.name(), "minimum exceeds maximum; every present value will be rejected");
        }
        Ok(kind)
    }

    fn build_fields(
        &self,
        map: &Map<String, Value>,
        depth: usize,
    ) -> Result<Vec<ValidationNode>, SchemaError> {
        map.iter()
            .map(|(key, schema)| self.build_node(NodeName::Field(key.clone()), schema, depth + 1))
            .collect()
    }

    /// Element schemas: a single schema, or a list of alternatives.
    fn build_items(&self, schema: &Value, depth: usize) -> Result<Vec<ValidationNode>, SchemaError> {
        match schema {
            Value::Array(alternatives) => alternatives
                .iter()
                .map(|alt| self.build_node(NodeName::Element, alt, depth + 1))
                .collect(),
            Value::String(_) | Value::Object(_) => {
                Ok(vec![self.build_node(NodeName::Element, schema, depth + 1)?])
            }
            _ => Ok(Vec::new()),
        }
    }

    fn length_bounds(&self, desc: &FormatDescriptor, overrides: Option<&Value>) -> (usize, usize) {
        let DefaultBounds::Length { min, max } = desc.bounds else {
            return (0, self.config.max_string_len);
        };
        let max = max.resolve(self.config);
        let Some(decl) = overrides else {
            return (min, max);
        };

        let (lo, hi) = if value::is_int_field(decl, "size") {
            let size = value::int_field(decl, "size", 0);
            (size, size)
        } else {
            (
                value::int_field(decl, "min", to_i64(min)),
                value::int_field(decl, "max", to_i64(max)),
            )
        };
        let min_len = to_len(lo.max(desc.min_floor));
        if hi < 0 {
            // A negative maximum admits no length; keep the bounds inverted.
            return (min_len.max(1), 0);
        }
        (min_len, to_len(hi))
    }
}

fn int_bounds(desc: &FormatDescriptor, overrides: Option<&Value>) -> (i64, i64) {
    let DefaultBounds::Int { min, max } = desc.bounds else {
        return (-MAX_SAFE_INTEGER, MAX_SAFE_INTEGER);
    };
    let Some(decl) = overrides else {
        return (min, max);
    };
    (
        value::int_field(decl, "min", min).max(desc.min_floor),
        value::int_field(decl, "max", max),
    )
}

fn float_bounds(desc: &FormatDescriptor, overrides: Option<&Value>) -> (f64, f64) {
    let DefaultBounds::Float { min, max } = desc.bounds else {
        return (f64::MIN, f64::MAX);
    };
    let Some(decl) = overrides else {
        return (min, max);
    };
    (
        value::float_field(decl, "min", min),
        value::float_field(decl, "max", max),
    )
}

fn to_len(v: i64) -> usize {
    usize::try_from(v).unwrap_or(0)
}

fn to_i64(v: usize) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}
