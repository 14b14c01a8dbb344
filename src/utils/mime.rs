//! MIME Type Detection Utilities
//!
//! Detects MIME types for upload parts, first from the filename extension
//! (via `mime_guess`) and then from magic numbers (via `infer`).

/// Fallback for content that cannot be identified
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file name or path (extension-based)
pub fn guess_mime_from_path(path: &str) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
}

/// Extension first, then content sniffing, then `application/octet-stream`.
pub fn guess_mime(filename: &str, bytes: &[u8]) -> String {
    guess_mime_from_path(filename)
        .or_else(|| guess_mime_from_bytes(bytes))
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}
