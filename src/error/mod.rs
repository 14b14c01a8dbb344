//! Error Handling Module
//!
//! This module provides the error type shared by the HTTP client and the
//! file actions:
//! - Core error types (`ClientError`, `ErrorCategory`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use postfiles::error::{ClientError, ErrorCategory};
//!
//! let error = ClientError::api_error(404, "Not found");
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert!(!error.is_unauthorized());
//! ```

mod conversions;
pub mod types;

pub use types::*;
