//! hosting-guardrails - Security guardrails for site-generation and hosting tools
//!
//! This library vets the arguments of tool calls before a handler runs,
//! vetoing file paths, SQL, PHP snippets, uploads and database credentials
//! that are unsafe on shared hosting.
//!
//! # Features
//!
//! - **Path safety**: Rejects absolute paths, `../` traversal and executable extensions
//! - **SQL safety**: Detects destructive or exfiltrating statements
//! - **Code safety**: Detects calls to process execution, eval and include functions
//! - **Upload safety**: Enforces a size ceiling and a MIME allowlist
//! - **Credential safety**: Rejects short passwords and default usernames
//! - **Dispatch gating**: Derives the checks from a tool call's arguments and
//!   never runs the handler of a denied call
//! - **Audit logging**: JSONL log of all decisions, secrets redacted
//!
//! # Example
//!
//! ```
//! use hosting_guardrails::{check_sql_safety, gate, GuardrailEngine, ToolInvocation};
//!
//! let verdict = check_sql_safety("DELETE FROM users");
//! assert!(!verdict.safe);
//!
//! let json = r#"{"name":"php_security_check","arguments":{"filePath":"../etc"}}"#;
//! let invocation = ToolInvocation::from_json(json).unwrap();
//!
//! let outcome = gate(GuardrailEngine::builtin(), &invocation).unwrap();
//! assert!(outcome.is_deny());
//! ```

pub mod audit;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod redact;
pub mod rules;

// Re-exports for convenience
pub use config::Config;
pub use dispatch::{gate, Dispatcher, Gate, ToolHandler};
pub use engine::{
    check_code_safety, check_credential_safety, check_path_safety, check_sql_safety,
    check_upload_safety, GuardrailEngine,
};
pub use error::{ConfigError, InputError, RuleError};
pub use input::{CredentialConfig, GuardInput, Request, ToolInvocation, UploadDescriptor};
pub use output::{ToolResult, Verdict, VerdictDetail};
pub use rules::RuleSet;
