//! Utilities

pub mod mime;

pub use mime::{guess_mime, guess_mime_from_bytes, guess_mime_from_path};
