//! Integration tests: run the subcommand handlers against schema and
//! document files on disk and check their exit codes.

use std::path::{Path, PathBuf};

use djv_cli::check_schema::{run_check_schema, CheckSchemaArgs};
use djv_cli::formats::{run_formats, FormatsArgs};
use djv_cli::validate::{run_validate, ValidateArgs};

const SCHEMA: &str = r#"{
    "type": "OBJECT",
    "object": {
        "name": {"type": "NONEMPTY.STRING", "required": true},
        "tel": "TELEPHONE"
    }
}"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn validate_args(schema: PathBuf, documents: Vec<PathBuf>) -> ValidateArgs {
    ValidateArgs {
        schema,
        documents,
        config: None,
        max_string_len: None,
        fail_closed: false,
        explain: false,
    }
}

#[test]
fn test_validate_passing_documents() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.json", SCHEMA);
    let json_doc = write(dir.path(), "a.json", r#"{"name": "삼색이", "tel": "010-1234-5678"}"#);
    let yaml_doc = write(dir.path(), "b.yaml", "name: father\n");

    let code = run_validate(&validate_args(schema, vec![json_doc, yaml_doc])).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn test_validate_failing_document() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.json", SCHEMA);
    let good = write(dir.path(), "good.json", r#"{"name": "a"}"#);
    let bad = write(dir.path(), "bad.json", r#"{"tel": "010-1234-5678"}"#);

    let code = run_validate(&validate_args(schema, vec![good, bad])).unwrap();
    assert_eq!(code, 1);
}

#[test]
fn test_validate_unreadable_document_counts_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.json", SCHEMA);
    let missing = dir.path().join("missing.json");

    let code = run_validate(&validate_args(schema, vec![missing])).unwrap();
    assert_eq!(code, 1);
}

#[test]
fn test_validate_with_config_limit() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.json", r#"{"type":"OBJECT","object":{"note":"STRING"}}"#);
    let config = write(dir.path(), "djv.yaml", "max_string_len: 3\n");
    let doc = write(dir.path(), "doc.json", r#"{"note": "four"}"#);

    let mut args = validate_args(schema, vec![doc]);
    assert_eq!(run_validate(&args).unwrap(), 0);

    args.config = Some(config);
    assert_eq!(run_validate(&args).unwrap(), 1);
}

#[test]
fn test_validate_invalid_schema() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.json", "42");
    let doc = write(dir.path(), "doc.json", "{}");

    let mut args = validate_args(schema, vec![doc]);
    assert!(run_validate(&args).is_err());

    args.fail_closed = true;
    assert_eq!(run_validate(&args).unwrap(), 1);
}

#[test]
fn test_check_schema() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "good.json", SCHEMA);
    let bad = write(dir.path(), "bad.json", "true");
    let bad_pattern = write(
        dir.path(),
        "pattern.json",
        r#"{"type":"STRING","regexp":"(unclosed"}"#,
    );

    let args = |schema| CheckSchemaArgs {
        schema,
        config: None,
        tree: true,
    };
    assert_eq!(run_check_schema(&args(good)).unwrap(), 0);
    assert_eq!(run_check_schema(&args(bad)).unwrap(), 1);
    assert_eq!(run_check_schema(&args(bad_pattern)).unwrap(), 0);
    assert!(run_check_schema(&args(dir.path().join("missing.json"))).is_err());
}

#[test]
fn test_formats() {
    let args = FormatsArgs {
        max_string_len: Some(10),
    };
    assert_eq!(run_formats(&args).unwrap(), 0);
}
