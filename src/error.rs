//! Error types for hosting-guardrails
//!
//! An unsafe verdict is never an error. These types cover the genuine faults:
//! a caller handing over malformed input, a rule set that does not compile,
//! and configuration that cannot be read.

use thiserror::Error;

/// The caller broke the input contract of a check or of a tool invocation
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("tool arguments must be a JSON object")]
    ArgumentsNotObject,

    #[error("argument `{field}` must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("argument `{present}` requires `{missing}`")]
    IncompletePair {
        present: &'static str,
        missing: &'static str,
    },
}

/// A rule set could not be compiled into an engine
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule {id} has an invalid pattern")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule {id} has a next-word guard but no whitespace group")]
    MissingWhitespaceGroup { id: String },
}

/// Configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}
