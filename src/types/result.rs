//! Action result types

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ClientError;

/// Uniform return value of every file action.
///
/// Serializes as `{"data": ..}` or `{"error": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionResult<T> {
    Data(T),
    Error(ClientError),
}

impl<T> ActionResult<T> {
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Self::Data(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<T, ClientError> {
        self.into()
    }
}

impl<T> From<Result<T, ClientError>> for ActionResult<T> {
    fn from(res: Result<T, ClientError>) -> Self {
        match res {
            Ok(data) => Self::Data(data),
            Err(err) => Self::Error(err),
        }
    }
}

impl<T> From<ActionResult<T>> for Result<T, ClientError> {
    fn from(res: ActionResult<T>) -> Self {
        match res {
            ActionResult::Data(data) => Ok(data),
            ActionResult::Error(err) => Err(err),
        }
    }
}

/// Payload of `get_missing_files_for_post`.
///
/// `Skipped` means the post was already indexed and no request was made; it
/// does not mean the post has no files. `Fetched` carries the delegated
/// call's whole result, failure included, so an inner error ends up under the
/// outer `data` field.
#[derive(Debug, Clone, PartialEq)]
pub enum MissingFiles {
    Skipped,
    Fetched(ActionResult<bool>),
}

impl Serialize for MissingFiles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Skipped => serializer.serialize_seq(Some(0))?.end(),
            Self::Fetched(inner) => inner.serialize(serializer),
        }
    }
}
