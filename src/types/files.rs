//! File types
//!
//! Shapes returned by the server's file routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-described metadata for a stored file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    /// Empty until the file is attached to a post
    #[serde(default)]
    pub post_id: String,
    /// Creation time, milliseconds since the epoch
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
    #[serde(default)]
    pub delete_at: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub has_preview_image: bool,
    /// Any field the server sends that is not modelled above
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileInfo {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.create_at)
    }

    pub fn is_deleted(&self) -> bool {
        self.delete_at != 0
    }
}

/// A `FileInfo` paired with the caller's correlation id, so optimistic UI
/// state can be matched against the server-confirmed record.
///
/// `client_id` is `None` when the server echoed fewer ids than files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    #[serde(flatten)]
    pub info: FileInfo,
    #[serde(rename = "clientId", default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Raw response of the upload route: two parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub file_infos: Vec<FileInfo>,
    #[serde(default)]
    pub client_ids: Vec<String>,
}

impl UploadResponse {
    /// Pair `file_infos[i]` with `client_ids[i]`.
    ///
    /// The pairing is positional, not keyed. Every returned file is kept;
    /// files past the end of `client_ids` get no client id.
    pub fn paired_files(&self) -> Vec<UploadedFile> {
        if self.file_infos.len() != self.client_ids.len() {
            tracing::warn!(
                target: "postfiles::actions",
                file_infos = self.file_infos.len(),
                client_ids = self.client_ids.len(),
                "upload response arrays differ in length"
            );
        }
        self.file_infos
            .iter()
            .enumerate()
            .map(|(index, info)| UploadedFile {
                info: info.clone(),
                client_id: self.client_ids.get(index).cloned(),
            })
            .collect()
    }
}

/// Response of the public-link route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePublicLink {
    pub link: String,
}
