//! Security rules for hosting-guardrails
//!
//! Fixed rule tables for the five guardrails, plus [`RuleSet`], the immutable
//! bundle a [`GuardrailEngine`](crate::engine::GuardrailEngine) is built from.

pub mod code;
pub mod credentials;
pub mod paths;
pub mod sql;
pub mod uploads;

/// A pattern rule definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Unique identifier for this rule
    pub id: &'static str,

    /// Regex pattern to match
    pub pattern: &'static str,

    /// Human-readable description of what the rule catches
    pub reason: &'static str,

    /// Word that must not start right after the pattern's trailing
    /// whitespace group. Stands in for a negative lookahead.
    pub unless_next: Option<&'static str>,
}

impl Rule {
    /// Create a new rule
    pub const fn new(id: &'static str, pattern: &'static str, reason: &'static str) -> Self {
        Self {
            id,
            pattern,
            reason,
            unless_next: None,
        }
    }

    /// Create a rule that only fires when `word` does not directly follow the
    /// whitespace captured by group 1 of `pattern`
    pub const fn unless_next(
        id: &'static str,
        pattern: &'static str,
        reason: &'static str,
        word: &'static str,
    ) -> Self {
        Self {
            id,
            pattern,
            reason,
            unless_next: Some(word),
        }
    }
}

/// Every table the guardrails evaluate against.
///
/// Never mutated after an engine is built from it. `RuleSet::default()` is the
/// built-in rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    /// Extensions rejected by the path check, with leading dot
    pub denied_extensions: Vec<&'static str>,

    /// Ordered SQL rules; first match wins
    pub sql: Vec<Rule>,

    /// Ordered function names rejected when called in a code snippet
    pub dangerous_functions: Vec<&'static str>,

    /// Largest accepted upload in bytes
    pub max_upload_bytes: u64,

    /// Accepted upload MIME types, matched exactly
    pub allowed_mime_types: Vec<&'static str>,

    /// Shortest accepted password, counted in UTF-16 code units
    pub min_password_chars: usize,

    /// Usernames rejected as defaults, matched exactly
    pub reserved_usernames: Vec<&'static str>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            denied_extensions: paths::DENIED_EXTENSIONS.to_vec(),
            sql: sql::SQL_RULES.to_vec(),
            dangerous_functions: code::DANGEROUS_FUNCTIONS.to_vec(),
            max_upload_bytes: uploads::MAX_UPLOAD_BYTES,
            allowed_mime_types: uploads::ALLOWED_MIME_TYPES.to_vec(),
            min_password_chars: credentials::MIN_PASSWORD_CHARS,
            reserved_usernames: credentials::RESERVED_USERNAMES.to_vec(),
        }
    }
}
