//! # Validation Tree
//!
//! [`ValidationNode`] is the compiled unit of a schema. Each node binds to a
//! position in the document through its [`NodeName`], carries a `required`
//! flag, and holds the per-kind constraints in [`NodeKind`]. Parents own
//! their children directly; schemas cannot reference themselves, so the
//! tree has no cycles.
//!
//! Nodes are only built by the compiler and are immutable afterwards.

use std::fmt;

use regex::Regex;

use crate::checkers::Checker;

/// Where a node finds the value it validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeName {
    /// The whole document (top-level schema or root alternative).
    Root,
    /// The enclosing value is an array element.
    Element,
    /// A named field of the enclosing object.
    Field(String),
}

impl NodeName {
    /// Field name to look up, or `None` for the sentinels.
    pub fn field(&self) -> Option<&str> {
        match self {
            NodeName::Field(name) => Some(name),
            NodeName::Root | NodeName::Element => None,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, NodeName::Root)
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeName::Root => f.write_str("(root)"),
            NodeName::Element => f.write_str("(element)"),
            NodeName::Field(name) => f.write_str(name),
        }
    }
}

/// Kind tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Int,
    Float,
    Number,
    String,
    Bool,
    Object,
    Array,
    Union,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::Union => "multi",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraints of a string node.
#[derive(Debug, Clone)]
pub struct StringRule {
    pub(crate) min_len: usize,
    pub(crate) max_len: usize,
    pub(crate) pattern: Option<Regex>,
    pub(crate) checker: Option<Checker>,
}

impl StringRule {
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Custom `regexp`; when present it overrides the checker.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn checker(&self) -> Option<Checker> {
        self.checker
    }
}

/// Per-kind constraints.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// No constraint; always passes.
    Null,
    Int { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    /// Integer or float, compared as `f64`.
    Number { min: f64, max: f64 },
    String(StringRule),
    Bool,
    Object { fields: Vec<ValidationNode> },
    Array {
        min_len: usize,
        max_len: usize,
        /// Element schemas; an element must match at least one.
        items: Vec<ValidationNode>,
    },
    Union { alternatives: Vec<ValidationNode> },
}

impl NodeKind {
    pub fn kind(&self) -> Kind {
        match self {
            NodeKind::Null => Kind::Null,
            NodeKind::Int { .. } => Kind::Int,
            NodeKind::Float { .. } => Kind::Float,
            NodeKind::Number { .. } => Kind::Number,
            NodeKind::String(_) => Kind::String,
            NodeKind::Bool => Kind::Bool,
            NodeKind::Object { .. } => Kind::Object,
            NodeKind::Array { .. } => Kind::Array,
            NodeKind::Union { .. } => Kind::Union,
        }
    }
}

/// Compiled schema node.
#[derive(Debug, Clone)]
pub struct ValidationNode {
    pub(crate) name: NodeName,
    pub(crate) required: bool,
    pub(crate) kind: NodeKind,
}

impl ValidationNode {
    pub(crate) fn new(name: NodeName, required: bool, kind: NodeKind) -> Self {
        Self {
            name,
            required,
            kind,
        }
    }

    pub fn name(&self) -> &NodeName {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> Kind {
        self.kind.kind()
    }

    pub fn constraints(&self) -> &NodeKind {
        &self.kind
    }

    /// Object fields, union alternatives, or array element schemas.
    pub fn children(&self) -> &[ValidationNode] {
        match &self.kind {
            NodeKind::Object { fields } => fields,
            NodeKind::Union { alternatives } => alternatives,
            NodeKind::Array { items, .. } => items,
            _ => &[],
        }
    }

    /// String constraints, if this is a string node.
    pub fn string_rule(&self) -> Option<&StringRule> {
        match &self.kind {
            NodeKind::String(rule) => Some(rule),
            _ => None,
        }
    }

    /// Find a direct child by field name.
    pub fn field(&self, name: &str) -> Option<&ValidationNode> {
        self.children()
            .iter()
            .find(|child| child.name.field() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_per_kind() {
        let leaf = ValidationNode::new(NodeName::Field("a".into()), false, NodeKind::Bool);
        let object = ValidationNode::new(
            NodeName::Root,
            false,
            NodeKind::Object {
                fields: vec![leaf.clone()],
            },
        );
        assert_eq!(object.children().len(), 1);
        assert_eq!(object.kind(), Kind::Object);
        assert!(object.field("a").is_some());
        assert!(object.field("b").is_none());
        assert!(leaf.children().is_empty());
    }

    #[test]
    fn test_names() {
        assert_eq!(NodeName::Root.field(), None);
        assert_eq!(NodeName::Element.field(), None);
        assert_eq!(NodeName::Field("tel".into()).field(), Some("tel"));
        assert_eq!(NodeName::Element.to_string(), "(element)");
        assert!(NodeName::Root.is_root());
    }

    #[test]
    fn test_node_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationNode>();
    }
}
