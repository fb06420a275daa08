//! JSONL audit logging for hosting-guardrails
//!
//! Records every gate decision to a JSONL file for later analysis. Argument
//! values that look like secrets are redacted before they are written.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::dispatch::Gate;
use crate::error::InputError;
use crate::input::{GuardInput, ToolInvocation};
use crate::output::Verdict;

/// Log level for audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Blocked,
    Error,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the decision
    pub timestamp: DateTime<Utc>,

    /// Log level (ALLOWED, BLOCKED, ERROR)
    pub level: LogLevel,

    /// Tool that was invoked, or `check:<kind>` for a direct guard request
    pub tool: String,

    /// Rule ID that matched (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    /// Redacted summary of the input
    pub input_summary: String,

    /// Reason for the decision
    pub reason: String,

    /// Session ID (if provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    /// Entry for a gated tool invocation
    pub fn for_gate(invocation: &ToolInvocation, gate: &Gate) -> Self {
        let (level, rule_id, reason) = match gate {
            Gate::Admit { checks } => (
                LogLevel::Allowed,
                None,
                format!("passed {} guardrail checks", checks),
            ),
            Gate::Deny(verdict) => (
                LogLevel::Blocked,
                verdict.rule_id.clone(),
                verdict.reason.clone().unwrap_or_default(),
            ),
        };

        Self {
            timestamp: Utc::now(),
            level,
            tool: invocation.name.clone(),
            rule_id,
            input_summary: invocation.summary(),
            reason,
            session_id: invocation.session_id.clone(),
        }
    }

    /// Entry for a direct guard request
    pub fn for_verdict(input: &GuardInput, verdict: &Verdict) -> Self {
        let level = if verdict.is_safe() {
            LogLevel::Allowed
        } else {
            LogLevel::Blocked
        };

        Self {
            timestamp: Utc::now(),
            level,
            tool: format!("check:{}", input.kind()),
            rule_id: verdict.rule_id.clone(),
            input_summary: input.summary(),
            reason: verdict.reason.clone().unwrap_or_else(|| "passed".to_string()),
            session_id: None,
        }
    }

    /// Entry for input that broke the contract
    pub fn for_input_error(invocation: Option<&ToolInvocation>, error: &InputError) -> Self {
        Self {
            timestamp: Utc::now(),
            level: LogLevel::Error,
            tool: invocation
                .map(|i| i.name.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            rule_id: Some("input-error".to_string()),
            input_summary: invocation.map(ToolInvocation::summary).unwrap_or_default(),
            reason: error.to_string(),
            session_id: invocation.and_then(|i| i.session_id.clone()),
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger. An unwritable path disables logging.
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            match OpenOptions::new().create(true).append(true).open(p) {
                Ok(file) => Some(BufWriter::new(file)),
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "audit log disabled");
                    None
                }
            }
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
