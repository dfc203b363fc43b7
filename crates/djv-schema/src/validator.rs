//! # Validator
//!
//! The public entry point: compile schema text once, then validate any
//! number of documents against it.
//!
//! ```
//! use djv_schema::Validator;
//! use serde_json::json;
//!
//! let mut validator = Validator::new();
//! assert!(validator.compile(r#"{"type":"OBJECT","object":{"email":"EMAIL"}}"#));
//! assert!(validator.is_valid(&json!({"email": "one@example.com"})));
//! assert!(!validator.is_valid(&json!({"email": "nope"})));
//! ```
//!
//! A validator holds at most one compiled schema. A failed compile leaves
//! it empty; what an empty validator does with documents is decided by
//! [`FailurePolicy`](djv_core::FailurePolicy). The default policy accepts
//! everything.

use serde_json::Value;
use tracing::{trace, warn};

use djv_core::{SchemaError, ValidationError, ValidatorConfig, Violation};

use crate::compile::{self, CompiledSchema, RootShape};
use crate::engine;
use crate::node::ValidationNode;

/// Compiled schema plus the configuration it was compiled with.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
    compiled: Option<CompiledSchema>,
}

impl Validator {
    /// Empty validator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty validator with an explicit configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            compiled: None,
        }
    }

    /// Build a validator and compile `schema_text` into it.
    pub fn from_schema(schema_text: &str, config: ValidatorConfig) -> Result<Self, SchemaError> {
        let mut validator = Self::with_config(config);
        validator.try_compile(schema_text)?;
        Ok(validator)
    }

    /// Compile `schema_text`, replacing any previous schema.
    ///
    /// Returns `false` if the schema does not compile; the validator is then
    /// left empty. Use [`try_compile`](Self::try_compile) to get the reason.
    pub fn compile(&mut self, schema_text: &str) -> bool {
        match self.try_compile(schema_text) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    error = %e,
                    fail_closed = self.config.is_fail_closed(),
                    "schema compile failed; validator is empty"
                );
                false
            }
        }
    }

    /// Compile `schema_text`, replacing any previous schema.
    ///
    /// # Errors
    ///
    /// Any [`SchemaError`] from the compiler. The previous schema is
    /// discarded either way.
    pub fn try_compile(&mut self, schema_text: &str) -> Result<(), SchemaError> {
        self.compiled = None;
        self.compiled = Some(compile::compile(schema_text, &self.config)?);
        Ok(())
    }

    /// Drop the compiled schema.
    pub fn reset(&mut self) {
        self.compiled = None;
    }

    pub fn is_valid(&self, document: &Value) -> bool {
        self.validate_optional(Some(document)).is_ok()
    }

    /// Validate a document, returning the first rejection found.
    pub fn is_valid_with_error(&self, document: &Value) -> Result<(), ValidationError> {
        self.validate_optional(Some(document))
    }

    /// Validate a document that may be missing altogether.
    ///
    /// A missing (or `null`) document passes only when the schema has no
    /// root alternatives.
    pub fn validate_optional(&self, document: Option<&Value>) -> Result<(), ValidationError> {
        let result = self.dispatch(document);
        match &result {
            Ok(()) => trace!("document accepted"),
            Err(e) => trace!(error = %e, "document rejected"),
        }
        result
    }

    fn dispatch(&self, document: Option<&Value>) -> Result<(), ValidationError> {
        let Some(compiled) = &self.compiled else {
            if self.config.is_fail_closed() {
                return Err(Violation::NotCompiled.into());
            }
            return Ok(());
        };

        let roots = compiled.roots();
        if roots.is_empty() {
            return Ok(());
        }
        let Some(document) = document.filter(|d| !d.is_null()) else {
            return Err(Violation::EmptyDocument.into());
        };

        match (compiled.shape(), roots) {
            (RootShape::Object, [root]) => engine::check(root, document),
            _ => engine::check_any(roots, document)
                .map_err(|attempts| Violation::NoRootMatched { attempts }.into()),
        }
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    pub fn root_shape(&self) -> Option<RootShape> {
        self.compiled.as_ref().map(CompiledSchema::shape)
    }

    /// The parsed schema, if one is compiled.
    pub fn schema(&self) -> Option<&Value> {
        self.compiled.as_ref().map(CompiledSchema::source)
    }

    /// Root alternatives; empty when nothing is compiled.
    pub fn roots(&self) -> &[ValidationNode] {
        self.compiled
            .as_ref()
            .map(CompiledSchema::roots)
            .unwrap_or_default()
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use djv_core::FailurePolicy;
    use serde_json::json;

    #[test]
    fn test_empty_validator_is_fail_open_by_default() {
        let validator = Validator::new();
        assert!(!validator.is_compiled());
        assert!(validator.is_valid(&json!({"anything": 1})));
        assert!(validator.validate_optional(None).is_ok());
    }

    #[test]
    fn test_fail_closed_rejects_without_schema() {
        let config = ValidatorConfig::default().with_failure_policy(FailurePolicy::FailClosed);
        let mut validator = Validator::with_config(config);
        assert!(!validator.compile("{not json"));
        let err = validator.is_valid_with_error(&json!({})).unwrap_err();
        assert_eq!(err.violation(), &Violation::NotCompiled);
    }

    #[test]
    fn test_failed_compile_discards_previous_schema() {
        let mut validator = Validator::new();
        assert!(validator.compile(r#""INT""#));
        assert!(!validator.is_valid(&json!("x")));

        assert!(!validator.compile("42"));
        assert!(!validator.is_compiled());
        assert!(validator.is_valid(&json!("x")));
    }

    #[test]
    fn test_recompile_replaces_schema() {
        let mut validator = Validator::new();
        assert!(validator.compile(r#""INT""#));
        assert!(validator.compile(r#""BOOL""#));
        assert!(validator.is_valid(&json!(true)));
        assert!(!validator.is_valid(&json!(1)));
        assert_eq!(validator.roots().len(), 1);
    }

    #[test]
    fn test_try_compile_reports_reason() {
        let mut validator = Validator::new();
        assert!(matches!(
            validator.try_compile("true"),
            Err(SchemaError::UnsupportedRoot { .. })
        ));
        assert!(Validator::from_schema("{oops", ValidatorConfig::default()).is_err());
    }

    #[test]
    fn test_object_root_error_is_unwrapped() {
        let validator = Validator::from_schema(
            r#"{"type":"OBJECT","object":{"name":{"type":"STRING","required":true}}}"#,
            ValidatorConfig::default(),
        )
        .unwrap();
        let err = validator.is_valid_with_error(&json!({})).unwrap_err();
        assert_eq!(err.path_string(), "name");
        assert_eq!(err.violation(), &Violation::Required);
    }

    #[test]
    fn test_alternatives_root() {
        let validator =
            Validator::from_schema(r#"["EMAIL","EMPTY.STRING"]"#, ValidatorConfig::default())
                .unwrap();
        assert_eq!(validator.root_shape(), Some(RootShape::Alternatives));
        assert!(validator.is_valid(&json!("")));
        assert!(validator.is_valid(&json!("one@example.com")));
        match validator.is_valid_with_error(&json!("11")).unwrap_err().violation() {
            Violation::NoRootMatched { attempts } => assert_eq!(attempts.len(), 2),
            other => panic!("expected NoRootMatched, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_alternatives_accept_everything() {
        let validator = Validator::from_schema("[]", ValidatorConfig::default()).unwrap();
        assert!(validator.is_valid(&json!(1)));
        assert!(validator.validate_optional(None).is_ok());
    }

    #[test]
    fn test_missing_document() {
        let validator = Validator::from_schema(r#""STRING""#, ValidatorConfig::default()).unwrap();
        assert_eq!(
            validator.validate_optional(None).unwrap_err().violation(),
            &Violation::EmptyDocument
        );
        assert_eq!(
            validator.is_valid_with_error(&Value::Null).unwrap_err().violation(),
            &Violation::EmptyDocument
        );
    }

    #[test]
    fn test_configured_max_string_len() {
        let config = ValidatorConfig::default().with_max_string_len(4);
        let validator = Validator::from_schema(r#""STRING""#, config).unwrap();
        assert!(validator.is_valid(&json!("abcd")));
        assert!(!validator.is_valid(&json!("abcde")));
        assert_eq!(validator.config().max_string_len, 4);
    }

    #[test]
    fn test_schema_accessors() {
        let mut validator = Validator::new();
        assert!(validator.schema().is_none());
        assert!(validator.roots().is_empty());
        assert!(validator.compile(r#""UUID""#));
        assert_eq!(validator.schema(), Some(&json!("UUID")));
        assert_eq!(validator.root_shape(), Some(RootShape::Alias));
        validator.reset();
        assert!(!validator.is_compiled());
    }

    #[test]
    fn test_validator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
    }
}
