#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use postfiles::client::FilesApi;
use postfiles::error::ClientError;
use postfiles::session::SessionGuard;
use postfiles::store::{Dispatch, GetState, MemoryStore};
use postfiles::types::{FileInfo, FilePublicLink, UploadResponse};

pub fn file(id: &str) -> FileInfo {
    FileInfo {
        id: id.to_string(),
        name: format!("{id}.txt"),
        extension: "txt".to_string(),
        mime_type: "text/plain".to_string(),
        ..Default::default()
    }
}

/// Scripted `FilesApi`. Records how many calls each route received and how
/// many units the observed store had dispatched when each call started.
#[derive(Default)]
pub struct FakeFilesApi {
    pub post_files: Mutex<Option<Result<Vec<FileInfo>, ClientError>>>,
    pub upload: Mutex<Option<Result<UploadResponse, ClientError>>>,
    pub link: Mutex<Option<Result<FilePublicLink, ClientError>>>,
    pub post_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub link_calls: AtomicUsize,
    pub uploaded_boundaries: Mutex<Vec<String>>,
    pub observed: Mutex<Option<Arc<MemoryStore>>>,
    pub history_len_at_call: Mutex<Vec<usize>>,
}

impl FakeFilesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observing(self, store: Arc<MemoryStore>) -> Self {
        *self.observed.lock().unwrap() = Some(store);
        self
    }

    pub fn with_post_files(self, res: Result<Vec<FileInfo>, ClientError>) -> Self {
        *self.post_files.lock().unwrap() = Some(res);
        self
    }

    pub fn with_upload(self, res: Result<UploadResponse, ClientError>) -> Self {
        *self.upload.lock().unwrap() = Some(res);
        self
    }

    pub fn with_link(self, res: Result<FilePublicLink, ClientError>) -> Self {
        *self.link.lock().unwrap() = Some(res);
        self
    }

    fn observe(&self) {
        if let Some(store) = self.observed.lock().unwrap().as_ref() {
            self.history_len_at_call
                .lock()
                .unwrap()
                .push(store.history().len());
        }
    }

    fn scripted<T: Clone>(slot: &Mutex<Option<Result<T, ClientError>>>) -> Result<T, ClientError> {
        slot.lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ClientError::HttpError("no scripted response".into())))
    }
}

#[async_trait]
impl FilesApi for FakeFilesApi {
    async fn get_file_infos_for_post(&self, _post_id: &str) -> Result<Vec<FileInfo>, ClientError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        self.observe();
        tokio::task::yield_now().await;
        Self::scripted(&self.post_files)
    }

    async fn upload_file(
        &self,
        _form_data: Bytes,
        boundary: &str,
    ) -> Result<UploadResponse, ClientError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.observe();
        self.uploaded_boundaries
            .lock()
            .unwrap()
            .push(boundary.to_string());
        tokio::task::yield_now().await;
        Self::scripted(&self.upload)
    }

    async fn get_file_public_link(&self, _file_id: &str) -> Result<FilePublicLink, ClientError> {
        self.link_calls.fetch_add(1, Ordering::SeqCst);
        self.observe();
        Self::scripted(&self.link)
    }
}

/// Session guard that records every error it is shown.
#[derive(Default)]
pub struct RecordingGuard {
    pub seen: Mutex<Vec<ClientError>>,
}

impl RecordingGuard {
    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl SessionGuard for RecordingGuard {
    fn check_session_expiry(&self, error: &ClientError, _: &dyn Dispatch, _: &dyn GetState) {
        self.seen.lock().unwrap().push(error.clone());
    }
}
