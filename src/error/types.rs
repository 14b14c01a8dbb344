//! Core error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced by the network layer.
///
/// The actions never inspect this beyond classification; the value is passed
/// through unchanged into failure events and returned results.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ClientError {
    /// Transport-level failure (connection refused, TLS, body read, ...)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The server answered with a non-success status
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        /// Server-side error identifier (e.g. `api.context.session_expired.app_error`)
        server_error_id: Option<String>,
        /// Request URL that produced the error
        url: Option<String>,
    },

    /// A response body could not be decoded into the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse classification of a `ClientError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Authentication,
    Client,
    Server,
    Network,
    Parsing,
    Configuration,
    Validation,
}

impl ClientError {
    /// Shorthand for an `ApiError` without server id or URL.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            server_error_id: None,
            url: None,
        }
    }

    /// HTTP status code, when the error came from a server response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// URL of the failed request, when known.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::ApiError { url, .. } => url.as_deref(),
            _ => None,
        }
    }

    /// Server-side error identifier, when the server sent one.
    pub fn server_error_id(&self) -> Option<&str> {
        match self {
            Self::ApiError {
                server_error_id, ..
            } => server_error_id.as_deref(),
            _ => None,
        }
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ApiError { message, .. } => message,
            Self::HttpError(msg)
            | Self::ParseError(msg)
            | Self::JsonError(msg)
            | Self::ConfigurationError(msg)
            | Self::InvalidInput(msg) => msg,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError { code, .. } => match *code {
                401 => ErrorCategory::Authentication,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            Self::HttpError(_) => ErrorCategory::Network,
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::InvalidInput(_) => ErrorCategory::Validation,
        }
    }

    /// True for HTTP 401 responses.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }
}
