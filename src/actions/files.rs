//! File actions
//!
//! Each action dispatches a request event, performs one call through
//! [`FilesApi`], and dispatches the terminal events as one batch.

use std::sync::Arc;

use bytes::Bytes;

use super::helpers::{ActionContext, ClientFuncBinding, bind_client_func};
use crate::action_types::FileAction;
use crate::client::{FilesApi, UploadForm};
use crate::types::{ActionResult, FileInfo, FilePublicLink, MissingFiles, UploadResponse};

/// File actions bound to a client and a store.
#[derive(Clone)]
pub struct FileActions {
    client: Arc<dyn FilesApi>,
    ctx: ActionContext,
}

impl FileActions {
    pub fn new(client: Arc<dyn FilesApi>, ctx: ActionContext) -> Self {
        Self { client, ctx }
    }

    /// Fetch the files attached to `post_id` into the store.
    ///
    /// Always hits the network. The file list only travels through the
    /// `RECEIVED_FILES_FOR_POST` event; the result is `Data(true)`.
    pub async fn get_files_for_post(&self, post_id: &str) -> ActionResult<bool> {
        let received_post_id = post_id.to_string();
        let binding = ClientFuncBinding::new(
            FileAction::FetchFilesForPostRequest,
            move |files: &Vec<FileInfo>| {
                vec![
                    FileAction::ReceivedFilesForPost {
                        data: files.clone(),
                        post_id: received_post_id,
                    },
                    FileAction::FetchFilesForPostSuccess,
                ]
            },
            |error| FileAction::FetchFilesForPostFailure { error },
        );

        match bind_client_func(
            &self.ctx,
            binding,
            self.client.get_file_infos_for_post(post_id),
        )
        .await
        {
            ActionResult::Data(_) => ActionResult::Data(true),
            ActionResult::Error(error) => ActionResult::Error(error),
        }
    }

    /// Fetch the post's files only if the store has no entry for it yet.
    ///
    /// The outer result is always `Data`: `Skipped` when nothing was fetched,
    /// otherwise the delegated call's whole result, failures included.
    pub async fn get_missing_files_for_post(&self, post_id: &str) -> ActionResult<MissingFiles> {
        if self.ctx.get_state().has_files_for_post(post_id) {
            tracing::debug!(target: "postfiles::actions", post_id, "files already known, skipping fetch");
            return ActionResult::Data(MissingFiles::Skipped);
        }
        let inner = self.get_files_for_post(post_id).await;
        ActionResult::Data(MissingFiles::Fetched(inner))
    }

    /// Upload a pre-encoded multipart body into `channel_id` (thread
    /// `root_id`, empty for none).
    ///
    /// `client_ids` are the caller's correlation ids; they are reported back
    /// on failure. On success each returned file is paired with the response's
    /// `client_ids` entry at the same index, and the raw response is returned.
    pub async fn upload_file(
        &self,
        channel_id: &str,
        root_id: &str,
        client_ids: Vec<String>,
        form_data: Bytes,
        form_boundary: &str,
    ) -> ActionResult<UploadResponse> {
        let (received_channel, received_root) = (channel_id.to_string(), root_id.to_string());
        let (failed_channel, failed_root) = (channel_id.to_string(), root_id.to_string());
        let binding = ClientFuncBinding::new(
            FileAction::UploadFilesRequest,
            move |resp: &UploadResponse| {
                vec![
                    FileAction::ReceivedUploadFiles {
                        data: resp.paired_files(),
                        channel_id: received_channel,
                        root_id: received_root,
                    },
                    FileAction::UploadFilesSuccess,
                ]
            },
            move |error| FileAction::UploadFilesFailure {
                client_ids,
                channel_id: failed_channel,
                root_id: failed_root,
                error,
            },
        );

        bind_client_func(
            &self.ctx,
            binding,
            self.client.upload_file(form_data, form_boundary),
        )
        .await
    }

    /// [`upload_file`](Self::upload_file) with body, boundary, channel and
    /// client ids taken from `form`.
    pub async fn upload_form(&self, root_id: &str, form: &UploadForm) -> ActionResult<UploadResponse> {
        self.upload_file(
            form.channel_id(),
            root_id,
            form.client_ids(),
            form.encode(),
            form.boundary(),
        )
        .await
    }

    pub async fn get_file_public_link(&self, file_id: &str) -> ActionResult<FilePublicLink> {
        let binding = ClientFuncBinding::with_kinds(
            FileAction::GetFilePublicLinkRequest,
            |data: &FilePublicLink| FileAction::ReceivedFilePublicLink { data: data.clone() },
            |data: &FilePublicLink| FileAction::GetFilePublicLinkSuccess { data: data.clone() },
            |error| FileAction::GetFilePublicLinkFailure { error },
        );
        bind_client_func(
            &self.ctx,
            binding,
            self.client.get_file_public_link(file_id),
        )
        .await
    }
}

impl std::fmt::Debug for FileActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileActions")
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}
