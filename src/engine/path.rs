//! File path safety checking
//!
//! Purely syntactic. Nothing here touches the filesystem.

use std::path::Path;

use crate::output::{Verdict, VerdictDetail};

/// Check a relative path supplied by a tool caller.
///
/// Rules run in order and the first failure is returned: absolute path,
/// parent-directory traversal, denied extension.
pub fn check_path(candidate: &str, denied_extensions: &[&str]) -> Verdict {
    if is_absolute(candidate) {
        return Verdict::deny("path-absolute", "absolute paths are not permitted")
            .with_suggestion("use a path relative to the site root");
    }

    if candidate.contains("../") || candidate.contains("..\\") {
        return Verdict::deny(
            "path-traversal",
            "parent-directory traversal is not permitted",
        )
        .with_suggestion("keep paths inside the site directory");
    }

    if let Some(extension) = denied_extension(candidate, denied_extensions) {
        return Verdict::deny(
            "path-denied-extension",
            format!("files with extension {} are not permitted", extension),
        )
        .with_detail(VerdictDetail::Extension(extension.to_string()));
    }

    Verdict::safe()
}

/// Absolute by the rules of the host platform. A rooted path such as `\site`
/// on Windows counts too.
fn is_absolute(candidate: &str) -> bool {
    let path = Path::new(candidate);
    path.is_absolute() || path.has_root()
}

/// Return the offending suffix as written in `candidate`
fn denied_extension<'a>(candidate: &'a str, denied_extensions: &[&str]) -> Option<&'a str> {
    let lowered = candidate.to_ascii_lowercase();

    denied_extensions.iter().find_map(|extension| {
        let extension = extension.to_ascii_lowercase();
        if lowered.ends_with(&extension) {
            // ASCII lowering keeps byte offsets stable
            candidate.get(candidate.len() - extension.len()..)
        } else {
            None
        }
    })
}
