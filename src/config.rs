//! Client configuration

use secrecy::{ExposeSecret, SecretString};

use crate::defaults;
use crate::error::ClientError;
use crate::types::HttpConfig;

/// Connection settings for [`HttpFilesClient`](crate::client::HttpFilesClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Server root, e.g. `https://chat.example.com` (no trailing slash)
    pub base_url: String,
    /// Personal access or session token sent as a Bearer token
    pub token: Option<SecretString>,
    pub http_config: HttpConfig,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Read `POSTFILES_BASE_URL` and, optionally, `POSTFILES_TOKEN`.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var(defaults::env::BASE_URL).map_err(|_| {
            ClientError::ConfigurationError(format!("{} is not set", defaults::env::BASE_URL))
        })?;
        let mut builder = Self::builder().base_url(base_url);
        if let Ok(token) = std::env::var(defaults::env::TOKEN) {
            builder = builder.token(token);
        }
        builder.build()
    }

    /// Absolute URL of an API route (`route` starts with `/`).
    pub fn api_url(&self, route: &str) -> String {
        format!("{}{}{}", self.base_url, defaults::routes::API_PREFIX, route)
    }

    pub(crate) fn bearer_token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("http_config", &self.http_config)
            .finish()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    token: Option<SecretString>,
    http_config: Option<HttpConfig>,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn http_config(mut self, http_config: HttpConfig) -> Self {
        self.http_config = Some(http_config);
        self
    }

    pub fn build(self) -> Result<ClientConfig, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::ConfigurationError("base_url not provided".to_string()))?;
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::ConfigurationError(format!(
                "base_url must be an http(s) URL, got '{base_url}'"
            )));
        }
        Ok(ClientConfig {
            base_url,
            token: self.token,
            http_config: self.http_config.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let cfg = ClientConfig::builder()
            .base_url("https://chat.example.com/")
            .build()
            .unwrap();
        assert_eq!(
            cfg.api_url("/files"),
            "https://chat.example.com/api/v4/files"
        );
    }

    #[test]
    fn rejects_missing_or_non_http_base_url() {
        assert!(matches!(
            ClientConfig::builder().build(),
            Err(ClientError::ConfigurationError(_))
        ));
        assert!(matches!(
            ClientConfig::builder().base_url("ftp://x").build(),
            Err(ClientError::ConfigurationError(_))
        ));
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = ClientConfig::builder()
            .base_url("http://localhost:8065")
            .token("very-secret-token")
            .build()
            .unwrap();
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("very-secret-token"));
        assert!(dbg.contains("REDACTED"));
        assert_eq!(cfg.bearer_token(), Some("very-secret-token"));
    }
}
