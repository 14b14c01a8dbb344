//! Store events emitted by the file actions.
//!
//! Events are handed to a [`Dispatch`](crate::store::Dispatch) sink and never
//! kept by the actions themselves.

use serde::{Deserialize, Serialize};

use crate::actions::errors::ErrorLog;
use crate::error::ClientError;
use crate::types::{FileInfo, FilePublicLink, UploadedFile};

/// A single store event. The `type` field carries the discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileAction {
    FetchFilesForPostRequest,
    ReceivedFilesForPost {
        data: Vec<FileInfo>,
        #[serde(rename = "postId")]
        post_id: String,
    },
    FetchFilesForPostSuccess,
    FetchFilesForPostFailure {
        error: ClientError,
    },

    UploadFilesRequest,
    ReceivedUploadFiles {
        data: Vec<UploadedFile>,
        #[serde(rename = "channelId")]
        channel_id: String,
        #[serde(rename = "rootId")]
        root_id: String,
    },
    UploadFilesSuccess,
    UploadFilesFailure {
        #[serde(rename = "clientIds")]
        client_ids: Vec<String>,
        #[serde(rename = "channelId")]
        channel_id: String,
        #[serde(rename = "rootId")]
        root_id: String,
        error: ClientError,
    },

    GetFilePublicLinkRequest,
    ReceivedFilePublicLink {
        data: FilePublicLink,
    },
    GetFilePublicLinkSuccess {
        data: FilePublicLink,
    },
    GetFilePublicLinkFailure {
        error: ClientError,
    },

    LogError {
        error: ErrorLog,
    },
    LogoutSuccess,
}

impl FileAction {
    /// The wire discriminant, e.g. `UPLOAD_FILES_SUCCESS`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FetchFilesForPostRequest => "FETCH_FILES_FOR_POST_REQUEST",
            Self::ReceivedFilesForPost { .. } => "RECEIVED_FILES_FOR_POST",
            Self::FetchFilesForPostSuccess => "FETCH_FILES_FOR_POST_SUCCESS",
            Self::FetchFilesForPostFailure { .. } => "FETCH_FILES_FOR_POST_FAILURE",
            Self::UploadFilesRequest => "UPLOAD_FILES_REQUEST",
            Self::ReceivedUploadFiles { .. } => "RECEIVED_UPLOAD_FILES",
            Self::UploadFilesSuccess => "UPLOAD_FILES_SUCCESS",
            Self::UploadFilesFailure { .. } => "UPLOAD_FILES_FAILURE",
            Self::GetFilePublicLinkRequest => "GET_FILE_PUBLIC_LINK_REQUEST",
            Self::ReceivedFilePublicLink { .. } => "RECEIVED_FILE_PUBLIC_LINK",
            Self::GetFilePublicLinkSuccess { .. } => "GET_FILE_PUBLIC_LINK_SUCCESS",
            Self::GetFilePublicLinkFailure { .. } => "GET_FILE_PUBLIC_LINK_FAILURE",
            Self::LogError { .. } => "LOG_ERROR",
            Self::LogoutSuccess => "LOGOUT_SUCCESS",
        }
    }
}

/// Unit handed to the dispatch sink: one event, or a batch that must be
/// applied atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dispatch", content = "actions", rename_all = "snake_case")]
pub enum Dispatched {
    Single(FileAction),
    Batch(Vec<FileAction>),
}

impl Dispatched {
    pub fn actions(&self) -> &[FileAction] {
        match self {
            Self::Single(action) => std::slice::from_ref(action),
            Self::Batch(actions) => actions,
        }
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.actions().iter().map(FileAction::kind).collect()
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }
}

impl From<FileAction> for Dispatched {
    fn from(action: FileAction) -> Self {
        Self::Single(action)
    }
}

impl From<Vec<FileAction>> for Dispatched {
    fn from(actions: Vec<FileAction>) -> Self {
        Self::Batch(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_serialized_tag() {
        let actions = [
            FileAction::FetchFilesForPostRequest,
            FileAction::ReceivedFilesForPost {
                data: vec![],
                post_id: "p1".into(),
            },
            FileAction::UploadFilesFailure {
                client_ids: vec!["c1".into()],
                channel_id: "ch".into(),
                root_id: String::new(),
                error: ClientError::HttpError("x".into()),
            },
            FileAction::LogoutSuccess,
        ];
        for action in actions {
            let v = serde_json::to_value(&action).unwrap();
            assert_eq!(v["type"], action.kind());
        }
    }

    #[test]
    fn payload_fields_use_store_names() {
        let v = serde_json::to_value(FileAction::ReceivedUploadFiles {
            data: vec![],
            channel_id: "ch".into(),
            root_id: "r".into(),
        })
        .unwrap();
        assert_eq!(v["channelId"], "ch");
        assert_eq!(v["rootId"], "r");
    }

    #[test]
    fn single_exposes_one_action() {
        let d: Dispatched = FileAction::UploadFilesRequest.into();
        assert!(!d.is_batch());
        assert_eq!(d.kinds(), vec!["UPLOAD_FILES_REQUEST"]);
    }
}
