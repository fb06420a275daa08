//! Guardrail engine for hosting-guardrails
//!
//! Evaluates the five checks against a compiled [`RuleSet`]. Every check is a
//! pure function of its input and the rule set, so one engine can be shared
//! by any number of threads.

pub mod code;
pub mod credential;
pub mod path;
pub mod sql;
pub mod upload;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::RuleError;
use crate::input::{CredentialConfig, GuardInput, UploadDescriptor};
use crate::output::Verdict;
use crate::rules::RuleSet;

use self::sql::CompiledSqlRule;

static BUILTIN: Lazy<GuardrailEngine> =
    Lazy::new(|| GuardrailEngine::new(RuleSet::default()).unwrap());

/// The main guardrail engine
#[derive(Debug, Clone)]
pub struct GuardrailEngine {
    rules: RuleSet,
    sql_rules: Vec<CompiledSqlRule>,
    code_calls: Vec<(&'static str, Regex)>,
}

impl GuardrailEngine {
    /// Compile an engine from a rule set
    pub fn new(rules: RuleSet) -> Result<Self, RuleError> {
        let sql_rules = sql::compile(&rules.sql)?;
        let code_calls = code::compile(&rules.dangerous_functions)?;

        Ok(Self {
            rules,
            sql_rules,
            code_calls,
        })
    }

    /// Shared engine over the built-in rule set
    pub fn builtin() -> &'static GuardrailEngine {
        &BUILTIN
    }

    /// Route a tagged guard input to its check
    pub fn check(&self, input: &GuardInput) -> Verdict {
        match input {
            GuardInput::Path { path } => self.check_path(path),
            GuardInput::Sql { statement } => self.check_sql(statement),
            GuardInput::Code { source } => self.check_code(source),
            GuardInput::Upload(upload) => self.check_upload(upload),
            GuardInput::Credential(config) => self.check_credentials(config),
        }
    }

    /// Check a relative file path
    pub fn check_path(&self, candidate: &str) -> Verdict {
        traced("path", path::check_path(candidate, &self.rules.denied_extensions))
    }

    /// Check a SQL statement
    pub fn check_sql(&self, statement: &str) -> Verdict {
        traced("sql", sql::check_statement(statement, &self.sql_rules))
    }

    /// Check a PHP source snippet
    pub fn check_code(&self, source: &str) -> Verdict {
        traced("code", code::check_source(source, &self.code_calls))
    }

    /// Check upload metadata
    pub fn check_upload(&self, upload: &UploadDescriptor) -> Verdict {
        traced(
            "upload",
            upload::check_upload(
                upload,
                self.rules.max_upload_bytes,
                &self.rules.allowed_mime_types,
            ),
        )
    }

    /// Check database credentials
    pub fn check_credentials(&self, config: &CredentialConfig) -> Verdict {
        traced(
            "credential",
            credential::check_credentials(
                config,
                self.rules.min_password_chars,
                &self.rules.reserved_usernames,
            ),
        )
    }

    /// Get the rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Default for GuardrailEngine {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

fn traced(check: &'static str, verdict: Verdict) -> Verdict {
    if verdict.is_unsafe() {
        debug!(
            check,
            rule_id = verdict.rule_id().unwrap_or_default(),
            "guardrail denied"
        );
    }
    verdict
}

/// Check a relative file path with the built-in rules
pub fn check_path_safety(candidate: &str) -> Verdict {
    GuardrailEngine::builtin().check_path(candidate)
}

/// Check a SQL statement with the built-in rules
pub fn check_sql_safety(statement: &str) -> Verdict {
    GuardrailEngine::builtin().check_sql(statement)
}

/// Check a PHP source snippet with the built-in rules
pub fn check_code_safety(source: &str) -> Verdict {
    GuardrailEngine::builtin().check_code(source)
}

/// Check upload metadata with the built-in rules
pub fn check_upload_safety(upload: &UploadDescriptor) -> Verdict {
    GuardrailEngine::builtin().check_upload(upload)
}

/// Check database credentials with the built-in rules
pub fn check_credential_safety(config: &CredentialConfig) -> Verdict {
    GuardrailEngine::builtin().check_credentials(config)
}
