//! `reqwest`-backed implementation of [`FilesApi`].

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::FilesApi;
use super::headers::HttpHeaderBuilder;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::{FileInfo, FilePublicLink, HttpConfig, UploadResponse};

/// Error body returned by the server on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Context for one outgoing request, used for logging and error reporting.
#[derive(Clone, Debug)]
struct RequestContext {
    method: &'static str,
    url: String,
}

/// HTTP client for the server's file routes.
#[derive(Debug, Clone)]
pub struct HttpFilesClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl HttpFilesClient {
    /// Build a client, including its `reqwest::Client`, from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http_client = build_http_client_from_config(&config.http_config)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Reuse an existing `reqwest::Client`. `config.http_config` is then only
    /// used for per-request headers.
    pub fn with_http_client(config: ClientConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn base_headers(&self) -> Result<HttpHeaderBuilder, ClientError> {
        let mut builder = HttpHeaderBuilder::new()
            .with_json_accept()
            .with_custom_headers(&self.config.http_config.headers)?;
        if let Some(token) = self.config.bearer_token() {
            builder = builder.with_bearer_auth(token)?;
        }
        Ok(builder)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        ctx: RequestContext,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        tracing::debug!(target: "postfiles::http", method = ctx.method, url = %ctx.url, "sending request");

        let result = self.send_and_decode(&ctx, request).await;
        if let Err(error) = &result {
            tracing::debug!(target: "postfiles::http", method = ctx.method, url = %ctx.url, err = %error, "request error");
        }
        result
    }

    async fn send_and_decode<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let resp = request
            .send()
            .await
            .map_err(|e| ClientError::HttpError(e.to_string()))?;

        let status = resp.status();
        tracing::debug!(target: "postfiles::http", method = ctx.method, url = %ctx.url, status = status.as_u16(), "response received");

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(api_error_from_body(status.as_u16(), &text, &ctx.url));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| ClientError::HttpError(format!("Failed to read response body: {e}")))?;
        serde_json::from_str(&text).map_err(|e| ClientError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl FilesApi for HttpFilesClient {
    async fn get_file_infos_for_post(&self, post_id: &str) -> Result<Vec<FileInfo>, ClientError> {
        let url = self.config.api_url(&format!(
            "/posts/{}/files/info",
            urlencoding::encode(post_id)
        ));
        let headers = self.base_headers()?.build();
        let request = self.http_client.get(&url).headers(headers);
        self.execute(RequestContext { method: "GET", url }, request)
            .await
    }

    async fn upload_file(
        &self,
        form_data: Bytes,
        boundary: &str,
    ) -> Result<UploadResponse, ClientError> {
        if boundary.is_empty() {
            return Err(ClientError::InvalidInput(
                "Form boundary cannot be empty".to_string(),
            ));
        }
        let url = self.config.api_url("/files");
        let headers: HeaderMap = self
            .base_headers()?
            .with_multipart_content_type(boundary)?
            .build();
        let request = self.http_client.post(&url).headers(headers).body(form_data);
        self.execute(RequestContext { method: "POST", url }, request)
            .await
    }

    async fn get_file_public_link(&self, file_id: &str) -> Result<FilePublicLink, ClientError> {
        let url = self
            .config
            .api_url(&format!("/files/{}/link", urlencoding::encode(file_id)));
        let headers = self.base_headers()?.build();
        let request = self.http_client.get(&url).headers(headers);
        self.execute(RequestContext { method: "GET", url }, request)
            .await
    }
}

/// Turn a non-success response into `ClientError::ApiError`, keeping the
/// server's message and error id when the body is a server error document.
fn api_error_from_body(code: u16, body: &str, url: &str) -> ClientError {
    let parsed = serde_json::from_str::<ServerErrorBody>(body).ok();
    let (server_error_id, message) = match parsed {
        Some(ServerErrorBody { id, message }) => (id, message),
        None => (None, None),
    };
    let message = message.unwrap_or_else(|| {
        if body.trim().is_empty() {
            format!("request failed with status {code}")
        } else {
            body.to_string()
        }
    });
    ClientError::ApiError {
        code,
        message,
        server_error_id,
        url: Some(url.to_string()),
    }
}

fn build_http_client_from_config(cfg: &HttpConfig) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = cfg.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = cfg.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    if let Some(proxy_url) = &cfg.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| ClientError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }
    if let Some(user_agent) = &cfg.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder
        .build()
        .map_err(|e| ClientError::ConfigurationError(format!("Failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_document_is_unpacked() {
        let body = r#"{"id":"api.context.session_expired.app_error","message":"Invalid or expired session, please login again.","status_code":401}"#;
        let err = api_error_from_body(401, body, "http://x/api/v4/files");
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(
            err.server_error_id(),
            Some("api.context.session_expired.app_error")
        );
        assert_eq!(
            err.message(),
            "Invalid or expired session, please login again."
        );
        assert_eq!(err.url(), Some("http://x/api/v4/files"));
    }

    #[test]
    fn plain_text_and_empty_bodies_fall_back() {
        let err = api_error_from_body(502, "Bad Gateway", "http://x");
        assert_eq!(err.message(), "Bad Gateway");
        let err = api_error_from_body(500, "", "http://x");
        assert_eq!(err.message(), "request failed with status 500");
    }

    #[test]
    fn invalid_proxy_is_rejected() {
        let cfg = HttpConfig::builder().proxy("http://[invalid").build();
        assert!(matches!(
            build_http_client_from_config(&cfg),
            Err(ClientError::ConfigurationError(_))
        ));
    }
}
