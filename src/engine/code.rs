//! PHP snippet safety checking
//!
//! A lexical scan for calls to dangerous functions. It does not know about
//! comments, strings or word boundaries, so it errs on the side of denying.

use regex::Regex;

use crate::error::RuleError;
use crate::output::{Verdict, VerdictDetail};

/// Compile one call pattern per function name, keeping the order
pub fn compile(functions: &[&'static str]) -> Result<Vec<(&'static str, Regex)>, RuleError> {
    functions
        .iter()
        .map(|&function| {
            Regex::new(&format!(r"(?i){}\s*\(", regex::escape(function)))
                .map(|regex| (function, regex))
                .map_err(|source| RuleError::InvalidPattern {
                    id: format!("code-{}", function),
                    source,
                })
        })
        .collect()
}

/// Check a source snippet; the first function found denies
pub fn check_source(source: &str, calls: &[(&'static str, Regex)]) -> Verdict {
    for (function, regex) in calls {
        if regex.is_match(source) {
            return Verdict::deny(
                format!("code-{}", function),
                format!("potentially dangerous PHP function detected: {}()", function),
            )
            .with_suggestion(format!("consider a safer alternative to {}()", function))
            .with_detail(VerdictDetail::Function(function.to_string()));
        }
    }

    Verdict::safe()
}
