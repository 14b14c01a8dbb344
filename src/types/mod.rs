//! Shared types

pub mod files;
pub mod http;
pub mod result;

pub use files::{FileInfo, FilePublicLink, UploadResponse, UploadedFile};
pub use http::{HttpConfig, HttpConfigBuilder};
pub use result::{ActionResult, MissingFiles};
