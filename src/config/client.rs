//! Platform client configuration.

use std::time::Duration;

/// Default HTTP client timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Resolved settings for talking to the platform's REST and GraphQL APIs.
///
/// Built by [`super::Config::platform`], which has already checked that the
/// base URL is present.
#[derive(Clone)]
pub struct PlatformConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Admin username for the token endpoint.
    pub admin_username: String,
    /// Admin password for the token endpoint.
    pub admin_password: String,
    /// Request timeout applied to every HTTP call.
    pub timeout: Duration,
}

impl PlatformConfig {
    /// Create a config for a base URL with default timeout and no credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_username: String::new(),
            admin_password: String::new(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Set admin credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin_username = username.into();
        self.admin_password = password.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// REST endpoint URL for a path such as `V1/products`.
    pub fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GraphQL endpoint URL.
    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url)
    }
}

// Password stays out of logs.
impl std::fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("base_url", &self.base_url)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = PlatformConfig::new("https://shop.test/");
        assert_eq!(config.rest_url("V1/products"), "https://shop.test/rest/V1/products");
        assert_eq!(config.rest_url("/V1/products"), "https://shop.test/rest/V1/products");
        assert_eq!(config.graphql_url(), "https://shop.test/graphql");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = PlatformConfig::new("https://shop.test").with_credentials("admin", "hunter2");
        let debug = format!("{:?}", config);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_builder() {
        let config = PlatformConfig::new("http://localhost")
            .with_timeout(Duration::from_secs(5))
            .with_credentials("u", "p");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.admin_username, "u");
        assert_eq!(config.admin_password, "p");
    }
}
