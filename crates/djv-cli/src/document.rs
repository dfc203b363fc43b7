//! # Document Loading
//!
//! Reads documents from files or stdin. `.json` files are parsed as JSON,
//! `.yaml` / `.yml` files as YAML converted to `serde_json::Value`. Input
//! with no recognizable extension is tried as JSON first, then YAML, so a
//! bare scalar such as `FF112345` on stdin is read as a string.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Syntax of a document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse document text. With no format given, JSON is tried before YAML.
pub fn parse_document(text: &str, format: Option<DocumentFormat>) -> Result<Value> {
    match format {
        Some(DocumentFormat::Json) => serde_json::from_str(text).context("invalid JSON document"),
        Some(DocumentFormat::Yaml) => parse_yaml(text),
        None => match serde_json::from_str(text) {
            Ok(value) => Ok(value),
            Err(_) => parse_yaml(text),
        },
    }
}

/// Read and parse a document file.
pub fn load_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(&text, DocumentFormat::from_path(path))
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Read and parse a document from stdin.
pub fn read_stdin() -> Result<Value> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    parse_document(&text, None).context("failed to parse stdin")
}

fn parse_yaml(text: &str) -> Result<Value> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).context("invalid YAML document")?;
    yaml_to_json_value(&yaml)
}

/// Convert a YAML value to the JSON value model. Map keys must be scalars
/// and are stringified; YAML tags are dropped.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => yaml_number(n)?,
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| yaml_to_json_value(item).with_context(|| format!("at [{i}]")))
                .collect::<Result<_>>()?,
        ),
        Yaml::Mapping(map) => Value::Object(
            map.iter()
                .map(|(k, v)| -> Result<(String, Value)> {
                    let key = yaml_key(k)?;
                    let value = yaml_to_json_value(v).with_context(|| format!("at '{key}'"))?;
                    Ok((key, value))
                })
                .collect::<Result<_>>()?,
        ),
        Yaml::Tagged(tagged) => yaml_to_json_value(&tagged.value)?,
    })
}

/// Integers keep their integer type so `INT` fields still match.
fn yaml_number(n: &serde_yaml::Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .with_context(|| format!("number {n} has no JSON representation"))
}

fn yaml_key(key: &serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => anyhow::bail!("map key must be a scalar, found {other:?}"),
    }
}
