//! Transport settings for the `reqwest` client behind `HttpFilesClient`.

use std::collections::HashMap;
use std::time::Duration;

use crate::defaults;

/// Timeouts, proxy, user agent and extra headers applied to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout, `None` for no limit
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    /// Sent on every request, after the crate's own headers
    pub headers: HashMap<String, String>,
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(defaults::http::REQUEST_TIMEOUT),
            connect_timeout: Some(defaults::http::CONNECT_TIMEOUT),
            headers: HashMap::new(),
            proxy: None,
            user_agent: Some(defaults::http::USER_AGENT.to_string()),
        }
    }
}

impl HttpConfig {
    pub fn builder() -> HttpConfigBuilder {
        HttpConfigBuilder {
            config: HttpConfig::default(),
        }
    }
}

/// Builder for [`HttpConfig`], starting from the crate defaults.
#[derive(Debug, Clone)]
pub struct HttpConfigBuilder {
    config: HttpConfig,
}

impl HttpConfigBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Let uploads of any size run to completion.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> HttpConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_starts_from_defaults() {
        let cfg = HttpConfig::builder().header("X-Request-Id", "abc").build();
        assert_eq!(cfg.timeout, Some(defaults::http::REQUEST_TIMEOUT));
        assert_eq!(cfg.headers.get("X-Request-Id").map(String::as_str), Some("abc"));
        assert!(cfg.user_agent.unwrap().starts_with("postfiles/"));
    }

    #[test]
    fn no_timeout_clears_only_the_request_limit() {
        let cfg = HttpConfig::builder().no_timeout().build();
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.connect_timeout, Some(defaults::http::CONNECT_TIMEOUT));
    }
}
