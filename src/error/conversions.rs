//! Type Conversions for ClientError
//!
//! This module contains From trait implementations for converting
//! common error types into ClientError.

use super::types::ClientError;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::InvalidInput(format!("I/O error: {err}"))
    }
}
