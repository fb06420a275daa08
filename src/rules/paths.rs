//! File path rules

/// Extensions of executables and native libraries. Compared case-insensitively
/// against the end of the path.
pub const DENIED_EXTENSIONS: &[&str] = &[".exe", ".sh", ".bat", ".cmd", ".dll", ".so"];
