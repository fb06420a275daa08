//! Database credential rules

pub const MIN_PASSWORD_CHARS: usize = 8;

/// Default administrative usernames, matched case-sensitively
pub const RESERVED_USERNAMES: &[&str] = &["root", "admin"];
