//! Actions
//!
//! Async operations that call the server and report into the store.

pub mod errors;
pub mod files;
pub mod helpers;

pub use errors::{ErrorLog, log_error};
pub use files::FileActions;
pub use helpers::{ActionContext, ClientFuncBinding, bind_client_func};
