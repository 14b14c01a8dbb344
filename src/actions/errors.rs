//! Error logging events

use serde::{Deserialize, Serialize};

use crate::action_types::FileAction;
use crate::error::{ClientError, ErrorCategory};

/// Log record derived from a failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLog {
    pub message: String,
    pub category: ErrorCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_error_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&ClientError> for ErrorLog {
    fn from(error: &ClientError) -> Self {
        Self {
            message: error.message().to_string(),
            category: error.category(),
            status_code: error.status_code(),
            server_error_id: error.server_error_id().map(str::to_string),
            url: error.url().map(str::to_string),
        }
    }
}

/// Build the `LOG_ERROR` event paired with every failure event.
pub fn log_error(error: &ClientError) -> FileAction {
    let log = ErrorLog::from(error);
    tracing::error!(
        target: "postfiles::actions",
        category = ?log.category,
        status = ?log.status_code,
        url = ?log.url,
        "{}",
        log.message
    );
    FileAction::LogError { error: log }
}
