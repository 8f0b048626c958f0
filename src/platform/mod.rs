//! Platform API clients.
//!
//! Thin reqwest wrappers over the commerce platform's REST admin API and
//! GraphQL storefront API. Nothing here retries: a failed call is reported
//! once and the caller decides whether to stop or carry on.

pub mod graphql;
pub mod rest;
pub mod token;

pub use graphql::GraphqlClient;
pub use rest::CatalogClient;
pub use token::{fetch_admin_token, AdminToken};

use reqwest::{Client, StatusCode};

use crate::config::PlatformConfig;

/// Errors from platform API calls.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// A GraphQL call failed at the HTTP level.
    #[error("GraphQL Request Failed: {0}")]
    GraphqlRequestFailed(String),

    /// A GraphQL call returned errors or an unexpected payload.
    #[error("GraphQL error: {0}")]
    Graphql(String),

    /// A request URL could not be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Build the shared HTTP client for a platform.
pub fn http_client(config: &PlatformConfig) -> Result<Client, PlatformError> {
    Ok(Client::builder().timeout(config.timeout).build()?)
}

/// Shorten a response body for log lines.
pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(500).collect()
}
