//! Upload limits

/// 10 MiB, the ceiling of typical shared-hosting upload configs
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types a site upload may carry
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "text/html",
    "text/css",
    "text/javascript",
    "application/javascript",
    "text/plain",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/svg+xml",
    "application/pdf",
    "application/zip",
    "application/x-zip-compressed",
];
