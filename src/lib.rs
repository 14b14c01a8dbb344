//! postfiles
//!
//! File actions for chat posts. Every action announces its request to a
//! store, performs exactly one call against the server's file routes, and
//! reports the outcome as a batch of store events plus an [`ActionResult`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use postfiles::prelude::*;
//!
//! let client = HttpFilesClient::new(ClientConfig::from_env()?)?;
//! let store = Arc::new(MemoryStore::new());
//! let actions = FileActions::new(Arc::new(client), ActionContext::from_store(store.clone()));
//!
//! actions.get_missing_files_for_post("post-id").await;
//! ```
#![deny(unsafe_code)]

pub mod action_types;
pub mod actions;
pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod observability;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;

pub use action_types::{Dispatched, FileAction};
pub use error::ClientError;
pub use types::ActionResult;

pub mod prelude {
    pub use crate::action_types::{Dispatched, FileAction};
    pub use crate::actions::{ActionContext, FileActions};
    pub use crate::client::{FilesApi, HttpFilesClient, UploadForm};
    pub use crate::config::ClientConfig;
    pub use crate::error::ClientError;
    pub use crate::session::{ForceLogoutGuard, NoopSessionGuard, SessionGuard};
    pub use crate::store::{Dispatch, GetState, MemoryStore};
    pub use crate::types::{
        ActionResult, FileInfo, FilePublicLink, HttpConfig, MissingFiles, UploadResponse,
        UploadedFile,
    };
}
