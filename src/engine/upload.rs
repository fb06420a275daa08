//! Upload safety checking

use crate::input::UploadDescriptor;
use crate::output::{Verdict, VerdictDetail};

const MIB: u64 = 1024 * 1024;

/// Check an upload: size ceiling first, then the MIME allowlist
pub fn check_upload(
    upload: &UploadDescriptor,
    max_bytes: u64,
    allowed_mime_types: &[&str],
) -> Verdict {
    if upload.size_bytes > max_bytes {
        return Verdict::deny(
            "upload-too-large",
            format!(
                "file exceeds the maximum allowed size of {}",
                human_size(max_bytes)
            ),
        )
        .with_suggestion("compress the file or split it into smaller parts")
        .with_detail(VerdictDetail::MaxBytes(max_bytes));
    }

    if !allowed_mime_types.contains(&upload.mime_type.as_str()) {
        return Verdict::deny(
            "upload-type-not-allowed",
            format!("file type not allowed: {}", upload.mime_type),
        )
        .with_detail(VerdictDetail::AllowedTypes(
            allowed_mime_types.iter().map(|t| t.to_string()).collect(),
        ));
    }

    Verdict::safe()
}

fn human_size(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= MIB {
        format!("{:.1}MB", bytes as f64 / MIB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
