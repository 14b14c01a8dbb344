//! Default Configuration Values
//!
//! This module centralizes default values used by the client.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout.
    ///
    /// Uploads go through the same client, so this is generous enough for a
    /// multi-megabyte multipart body on a slow link.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("postfiles/", env!("CARGO_PKG_VERSION"));
}

/// Server API routes
pub mod routes {
    /// Prefix shared by every REST route
    pub const API_PREFIX: &str = "/api/v4";
}

/// Environment variable names read by `ClientConfig::from_env`
pub mod env {
    pub const BASE_URL: &str = "POSTFILES_BASE_URL";
    pub const TOKEN: &str = "POSTFILES_TOKEN";
}
