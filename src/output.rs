//! Guardrail verdicts and tool-call results
//!
//! A [`Verdict`] is what every check returns. A [`ToolResult`] is what the
//! invoking agent sees when a gated call is denied or completes.

use serde::Serialize;

use crate::error::InputError;

/// Structured safe/unsafe result of a single guardrail check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Whether the candidate passed
    pub safe: bool,

    /// Rule that denied the candidate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    /// Why the candidate was denied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// How the caller can fix the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Diagnostic detail, flattened into the JSON form
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub extra: Option<VerdictDetail>,
}

/// Extra diagnostics attached to an unsafe verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VerdictDetail {
    /// Offending extension, as written in the path
    Extension(String),

    /// Source of the SQL pattern that matched
    Pattern(String),

    /// Function whose call was detected
    Function(String),

    /// Upload ceiling in bytes
    MaxBytes(u64),

    /// Full MIME allowlist
    AllowedTypes(Vec<String>),

    /// Rejected username
    Username(String),
}

impl Verdict {
    /// Create a passing verdict
    pub fn safe() -> Self {
        Verdict {
            safe: true,
            rule_id: None,
            reason: None,
            suggestion: None,
            extra: None,
        }
    }

    /// Create a denying verdict
    pub fn deny(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Verdict {
            safe: false,
            rule_id: Some(rule_id.into()),
            reason: Some(reason.into()),
            suggestion: None,
            extra: None,
        }
    }

    /// Attach a remediation hint
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach diagnostic detail
    pub fn with_detail(mut self, detail: VerdictDetail) -> Self {
        self.extra = Some(detail);
        self
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    pub fn is_unsafe(&self) -> bool {
        !self.safe
    }

    pub fn rule_id(&self) -> Option<&str> {
        self.rule_id.as_deref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// One block of tool-call result content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

/// Result handed back to the agent for a tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    pub content: Vec<Content>,

    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    /// Successful handler output. Strings pass through as-is, anything else is
    /// rendered as pretty JSON.
    pub fn success(value: serde_json::Value) -> Self {
        let text = match value {
            serde_json::Value::String(s) => s,
            other => serde_json::to_string_pretty(&other).unwrap_or_default(),
        };
        ToolResult {
            content: vec![Content::Text { text }],
            is_error: false,
        }
    }

    /// Error result carrying a plain message
    pub fn error(message: impl Into<String>) -> Self {
        ToolResult {
            content: vec![Content::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// Error result for a call a guardrail refused
    pub fn denied(verdict: &Verdict) -> Self {
        let rule_id = verdict.rule_id().unwrap_or("guardrail");
        let reason = verdict.reason().unwrap_or("operation denied");
        let mut text = format!("[guardrails:{}] Blocked: {}", rule_id, reason);
        if let Some(ref suggestion) = verdict.suggestion {
            text.push_str("\nSuggestion: ");
            text.push_str(suggestion);
        }
        ToolResult::error(text)
    }

    /// Error result for a call whose arguments broke the input contract
    pub fn input_error(error: &InputError) -> Self {
        ToolResult::error(format!(
            "[guardrails:input-error] Invalid tool invocation: {}",
            error
        ))
    }

    /// Text of the first content block
    pub fn text(&self) -> &str {
        match self.content.first() {
            Some(Content::Text { text }) => text,
            None => "",
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
