//! # Check-Schema Subcommand
//!
//! Compiles a schema without validating anything and reports its root shape,
//! or the compile error. With `--tree`, prints the compiled validation tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use djv_schema::{compile, CompiledSchema, NodeKind, RootShape, ValidationNode};

use crate::validate::build_config;

/// Arguments for the check-schema subcommand.
#[derive(Args, Debug)]
pub struct CheckSchemaArgs {
    /// Schema file (JSON).
    pub schema: PathBuf,

    /// Validator configuration file (YAML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the compiled validation tree.
    #[arg(long)]
    pub tree: bool,
}

/// Execute the check-schema subcommand.
pub fn run_check_schema(args: &CheckSchemaArgs) -> Result<u8> {
    let config = build_config(args.config.as_deref(), None, false)?;
    let text = std::fs::read_to_string(&args.schema)
        .with_context(|| format!("failed to read schema {}", args.schema.display()))?;
    let label = args.schema.display();

    match compile(&text, &config) {
        Ok(compiled) => {
            println!("OK {label}: {}", summary(&compiled));
            if args.tree {
                for line in tree_lines(compiled.roots()) {
                    println!("{line}");
                }
            }
            Ok(0)
        }
        Err(e) => {
            println!("FAIL {label}: {e}");
            Ok(1)
        }
    }
}

/// One-line description of a compiled schema.
pub fn summary(compiled: &CompiledSchema) -> String {
    let shape = match compiled.shape() {
        RootShape::Object => "object",
        RootShape::Alias => "format name",
        RootShape::Alternatives => "alternatives",
    };
    let n = compiled.roots().len();
    let plural = if n == 1 { "" } else { "s" };
    format!("{shape} schema, {n} root alternative{plural}")
}

/// Indented rendering of a validation tree, one node per line.
pub fn tree_lines(roots: &[ValidationNode]) -> Vec<String> {
    let mut lines = Vec::new();
    for root in roots {
        push_node(root, 0, &mut lines);
    }
    lines
}

fn push_node(node: &ValidationNode, depth: usize, lines: &mut Vec<String>) {
    let mut line = format!("{}{}: {}", "  ".repeat(depth), node.name(), node.kind());
    match node.constraints() {
        NodeKind::Int { min, max } => line.push_str(&format!(" [{min}, {max}]")),
        NodeKind::Float { min, max } | NodeKind::Number { min, max } => {
            line.push_str(&format!(" [{min:e}, {max:e}]"))
        }
        NodeKind::String(rule) => {
            line.push_str(&format!(" len [{}, {}]", rule.min_len(), rule.max_len()));
            if let Some(pattern) = rule.pattern() {
                line.push_str(&format!(" regexp `{}`", pattern.as_str()));
            } else if let Some(checker) = rule.checker() {
                line.push_str(&format!(" check {}", checker.name()));
            }
        }
        NodeKind::Array { min_len, max_len, .. } => {
            line.push_str(&format!(" len [{min_len}, {max_len}]"))
        }
        _ => {}
    }
    if node.is_required() {
        line.push_str(" required");
    }
    lines.push(line);

    for child in node.children() {
        push_node(child, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use djv_core::ValidatorConfig;

    fn compiled(schema: &str) -> CompiledSchema {
        compile(schema, &ValidatorConfig::default()).unwrap()
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            summary(&compiled(r#"{"type":"OBJECT"}"#)),
            "object schema, 1 root alternative"
        );
        assert_eq!(
            summary(&compiled(r#"["EMAIL","EMPTY.STRING"]"#)),
            "alternatives schema, 2 root alternatives"
        );
        assert_eq!(summary(&compiled(r#""UUID""#)), "format name schema, 1 root alternative");
    }

    #[test]
    fn test_tree_lines() {
        let schema = compiled(
            r#"{"type":"OBJECT","object":{
                "email":{"type":"EMAIL","required":true},
                "skill":{"type":"ARRAY","max":3,"array":"INT"}
            }}"#,
        );
        let lines = tree_lines(schema.roots());
        assert_eq!(
            lines,
            vec![
                "(root): object".to_string(),
                "  email: string len [3, 255] check email required".to_string(),
                "  skill: array len [0, 3]".to_string(),
                "    (element): int [-9007199254740991, 9007199254740991]".to_string(),
            ]
        );
    }

    #[test]
    fn test_tree_shows_regexp() {
        let schema = compiled(r#"{"type":"STRING","max":4,"regexp":"^a"}"#);
        assert_eq!(tree_lines(schema.roots()), vec!["(root): string len [0, 4] regexp `^a`"]);
    }
}
