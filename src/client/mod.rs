//! Network layer
//!
//! [`FilesApi`] is the seam the actions call through; [`HttpFilesClient`] is
//! the `reqwest` implementation talking to the server's REST routes.

pub mod form;
pub mod headers;
pub mod http;

pub use form::{UploadForm, generate_boundary};
pub use http::HttpFilesClient;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ClientError;
use crate::types::{FileInfo, FilePublicLink, UploadResponse};

/// File routes of the server API.
#[async_trait]
pub trait FilesApi: Send + Sync {
    /// Metadata of every file attached to a post.
    async fn get_file_infos_for_post(&self, post_id: &str) -> Result<Vec<FileInfo>, ClientError>;

    /// Upload a pre-encoded `multipart/form-data` body delimited by `boundary`.
    async fn upload_file(
        &self,
        form_data: Bytes,
        boundary: &str,
    ) -> Result<UploadResponse, ClientError>;

    async fn get_file_public_link(&self, file_id: &str) -> Result<FilePublicLink, ClientError>;
}
