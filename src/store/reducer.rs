//! Files slice reducer

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::action_types::FileAction;
use crate::types::FileInfo;

/// The `entities.files` slice of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesState {
    /// File metadata by file id
    pub files: HashMap<String, FileInfo>,
    /// Known file ids by post id
    pub file_ids_by_post_id: HashMap<String, HashSet<String>>,
    /// Last public link received
    pub file_public_link: Option<String>,
}

/// Apply one event to the files slice. Events that do not concern the slice
/// leave it untouched.
pub fn reduce(state: &mut FilesState, action: &FileAction) {
    match action {
        FileAction::ReceivedFilesForPost { data, post_id } => {
            let ids = state
                .file_ids_by_post_id
                .entry(post_id.clone())
                .or_default();
            ids.clear();
            for file in data {
                ids.insert(file.id.clone());
                state.files.insert(file.id.clone(), file.clone());
            }
        }
        FileAction::ReceivedUploadFiles { data, .. } => {
            for file in data {
                state.files.insert(file.info.id.clone(), file.info.clone());
            }
        }
        FileAction::ReceivedFilePublicLink { data } => {
            state.file_public_link = Some(data.link.clone());
        }
        FileAction::LogoutSuccess => *state = FilesState::default(),
        _ => {}
    }
}
