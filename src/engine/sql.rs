//! SQL statement safety checking
//!
//! Pattern matching only. No parsing, so multi-statement strings and WHERE
//! clauses placed after other clauses are judged on their text alone.

use regex::Regex;

use crate::error::RuleError;
use crate::output::{Verdict, VerdictDetail};
use crate::rules::Rule;

/// A SQL rule with its regex compiled
#[derive(Debug, Clone)]
pub struct CompiledSqlRule {
    rule: Rule,
    regex: Regex,
}

impl CompiledSqlRule {
    /// Compile a rule. Rules with `unless_next` must capture the trailing
    /// whitespace in group 1.
    pub fn new(rule: Rule) -> Result<Self, RuleError> {
        let regex = Regex::new(rule.pattern).map_err(|source| RuleError::InvalidPattern {
            id: rule.id.to_string(),
            source,
        })?;

        if rule.unless_next.is_some() && regex.captures_len() < 2 {
            return Err(RuleError::MissingWhitespaceGroup {
                id: rule.id.to_string(),
            });
        }

        Ok(Self { rule, regex })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Check whether the rule fires anywhere in `statement`.
    ///
    /// For guarded rules this reproduces `pattern(?!WORD)` with a greedy
    /// whitespace run: a backtracking engine can give up one whitespace
    /// character, so a run longer than one always matches.
    pub fn is_match(&self, statement: &str) -> bool {
        let Some(word) = self.rule.unless_next else {
            return self.regex.is_match(statement);
        };

        self.regex.captures_iter(statement).any(|caps| match caps.get(1) {
            Some(whitespace) => {
                whitespace.as_str().chars().count() > 1
                    || !starts_with_ignore_case(&statement[whitespace.end()..], word)
            }
            None => true,
        })
    }
}

fn starts_with_ignore_case(text: &str, word: &str) -> bool {
    text.as_bytes()
        .get(..word.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(word.as_bytes()))
}

/// Compile an ordered rule list
pub fn compile(rules: &[Rule]) -> Result<Vec<CompiledSqlRule>, RuleError> {
    rules.iter().copied().map(CompiledSqlRule::new).collect()
}

/// Check a SQL statement against the rules in order; first match denies
pub fn check_statement(statement: &str, rules: &[CompiledSqlRule]) -> Verdict {
    for compiled in rules {
        if compiled.is_match(statement) {
            let rule = compiled.rule();
            return Verdict::deny(
                rule.id,
                format!("potentially dangerous SQL operation detected: {}", rule.reason),
            )
            .with_suggestion("scope the statement with a WHERE clause or run it manually")
            .with_detail(VerdictDetail::Pattern(rule.pattern.to_string()));
        }
    }

    Verdict::safe()
}
