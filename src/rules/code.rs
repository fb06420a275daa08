//! Dangerous PHP functions
//!
//! Any of these names followed by `(` is treated as a call, wherever it shows
//! up in the snippet (comments and string literals included).

/// Function names in evaluation order
pub const DANGEROUS_FUNCTIONS: &[&str] = &[
    "exec",
    "shell_exec",
    "system",
    "passthru",
    "eval",
    "popen",
    "proc_open",
    "assert",
    "create_function",
    "include_once",
    "require_once",
    "include",
    "require",
];
