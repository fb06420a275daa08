//! Input parsing for guard requests and tool invocations
//!
//! Parses the JSON a tool dispatcher hands over: either a tool invocation to be
//! gated, or a direct request for one guardrail check.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::redact;

/// Size and type of a file about to be uploaded
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDescriptor {
    #[serde(alias = "size")]
    pub size_bytes: u64,

    #[serde(alias = "mimetype")]
    pub mime_type: String,
}

/// The part of a database connection config the credential check inspects
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CredentialConfig {
    #[serde(alias = "user")]
    pub username: String,
    pub password: String,
}

/// A single guardrail check to run, tagged by check
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum GuardInput {
    /// Relative file path supplied by a tool caller
    Path { path: String },

    /// Raw SQL statement
    Sql { statement: String },

    /// Raw PHP source snippet
    Code { source: String },

    Upload(UploadDescriptor),

    Credential(CredentialConfig),
}

impl GuardInput {
    /// Name of the check this input is for
    pub fn kind(&self) -> &'static str {
        match self {
            GuardInput::Path { .. } => "path",
            GuardInput::Sql { .. } => "sql",
            GuardInput::Code { .. } => "code",
            GuardInput::Upload(_) => "upload",
            GuardInput::Credential(_) => "credential",
        }
    }

    /// Get a summary of the input for logging. Never includes a password.
    pub fn summary(&self) -> String {
        match self {
            GuardInput::Path { path } => format!("path: {}", truncate(path)),
            GuardInput::Sql { statement } => format!("sql: {}", truncate(statement)),
            GuardInput::Code { source } => format!("code: {}", truncate(source)),
            GuardInput::Upload(upload) => {
                format!("upload: {} bytes, {}", upload.size_bytes, upload.mime_type)
            }
            GuardInput::Credential(config) => format!("credential: user={}", config.username),
        }
    }
}

/// A tool call as received from the agent
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolInvocation {
    /// Name of the tool being invoked (e.g. "php_create_site")
    pub name: String,

    /// Tool arguments, expected to be a JSON object
    #[serde(default = "empty_arguments")]
    pub arguments: serde_json::Value,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,
}

fn empty_arguments() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl ToolInvocation {
    /// Build an invocation in code
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
            session_id: None,
        }
    }

    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(InputError::InvalidJson)
    }

    /// Get a summary of the invocation for logging, with secrets redacted
    pub fn summary(&self) -> String {
        let redacted = redact::redact_arguments(&self.arguments);
        truncate(&format!("{}: {}", self.name, redacted))
    }
}

/// Anything the binary accepts on stdin
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Guard(GuardInput),
    Invocation(ToolInvocation),
}

impl Request {
    /// Parse a request. Objects with a `check` field are guard requests,
    /// everything else must be a tool invocation.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Self::from_slice(json.as_bytes())
    }

    /// Parse a request from raw bytes. Bytes that are not UTF-8 are
    /// rejected as invalid JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, InputError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(InputError::InvalidJson)?;

        if value.get("check").is_some() {
            return serde_json::from_value(value)
                .map(Request::Guard)
                .map_err(InputError::InvalidJson);
        }

        serde_json::from_value(value)
            .map(Request::Invocation)
            .map_err(InputError::InvalidJson)
    }
}

fn truncate(text: &str) -> String {
    const MAX_CHARS: usize = 100;
    if text.chars().count() > MAX_CHARS {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
