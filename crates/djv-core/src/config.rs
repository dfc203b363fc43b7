//! # Validator Configuration
//!
//! Explicit configuration threaded into the schema compiler. There is no
//! process-wide mutable state: a validator compiled with one config never
//! observes another.
//!
//! Config files may be YAML (`.yaml` / `.yml`) or JSON; unknown keys are
//! rejected so that a typo never silently falls back to a default.
//!
//! ```yaml
//! max_string_len: 65536
//! max_depth: 32
//! on_compile_failure: fail_closed
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum length of string-family values that declare no explicit
/// maximum (2 MiB of characters).
pub const DEFAULT_MAX_STRING_LEN: usize = 2_097_152;

/// Default limit on schema nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What an uncompiled validator does with documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Accept everything. A caller that ignores a failed compile gets a
    /// validator that never rejects.
    #[default]
    FailOpen,
    /// Reject everything until a schema compiles successfully.
    FailClosed,
}

/// Configuration consumed at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Maximum length for string-family types without an explicit `max`.
    pub max_string_len: usize,
    /// Maximum schema nesting depth accepted by the compiler.
    pub max_depth: usize,
    /// Behavior of a validator whose last compile failed.
    pub on_compile_failure: FailurePolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            on_compile_failure: FailurePolicy::FailOpen,
        }
    }
}

/// Error loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config '{path}': {source}")]
    Io {
        /// Path of the config file.
        path: String,
        /// Underlying read error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for a config.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file is not valid JSON for a config.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed, but semantically unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ValidatorConfig {
    /// Override the default maximum string length.
    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    /// Override the schema nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the compile-failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_compile_failure = policy;
        self
    }

    /// Whether an uncompiled validator rejects every document.
    pub fn is_fail_closed(&self) -> bool {
        self.on_compile_failure == FailurePolicy::FailClosed
    }

    /// Parse a YAML config document.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.checked()
    }

    /// Parse a JSON config document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    /// Load a config file, choosing the format by extension (`.json` is
    /// JSON, anything else is YAML).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        Ok(self)
    }
}
