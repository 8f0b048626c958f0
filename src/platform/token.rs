//! Admin token helper.
//!
//! Exchanges admin credentials for the bearer token every REST call needs.
//! Tokens live for the process only; there is no refresh.

use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use super::{truncate_body, PlatformError};
use crate::config::PlatformConfig;

/// Opaque admin bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminToken(String);

impl AdminToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix safe to put in logs.
    pub fn preview(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{}...", prefix)
    }
}

impl std::fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdminToken({})", self.preview())
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Request an admin token.
///
/// POSTs `{username, password}` to `/rest/V1/integration/admin/token`. The
/// platform answers with the token as a JSON string; a bare body is accepted
/// as well. Failures are logged with the response body before being returned.
pub async fn fetch_admin_token(
    client: &Client,
    config: &PlatformConfig,
) -> Result<AdminToken, PlatformError> {
    let url = config.rest_url("V1/integration/admin/token");
    let request = TokenRequest {
        username: &config.admin_username,
        password: &config.admin_password,
    };

    let response = match client.post(&url).json(&request).send().await {
        Ok(response) => response,
        Err(e) => {
            error!(url = %url, error = %e, "Error obtaining Admin Token");
            return Err(e.into());
        }
    };

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        error!(
            url = %url,
            status = %status,
            body = %truncate_body(&body),
            "Error obtaining Admin Token"
        );
        return Err(PlatformError::Status { status, body });
    }

    let token = parse_token(&body);
    if token.is_empty() {
        error!(url = %url, "Admin Token response was empty");
        return Err(PlatformError::Status { status, body });
    }

    let token = AdminToken::new(token);
    info!(token = %token.preview(), "Admin Token obtained");
    Ok(token)
}

fn parse_token(body: &str) -> String {
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_string())
}
