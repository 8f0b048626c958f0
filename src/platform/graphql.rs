//! GraphQL storefront client.
//!
//! Posts `{query, variables}` documents to `{base}/graphql`. HTTP-level
//! failures become [`PlatformError::GraphqlRequestFailed`]; a response with a
//! non-empty `errors` array or no `data` becomes [`PlatformError::Graphql`].

use reqwest::header::COOKIE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use super::{truncate_body, PlatformError};
use crate::config::PlatformConfig;

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

/// GraphQL client bound to one endpoint.
#[derive(Clone)]
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
    cookie: Option<String>,
}

impl GraphqlClient {
    pub fn new(client: Client, config: &PlatformConfig) -> Self {
        Self {
            client,
            endpoint: config.graphql_url(),
            cookie: None,
        }
    }

    /// Attach a `Cookie` header to every request. Empty values are ignored.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        self.cookie = if cookie.trim().is_empty() {
            None
        } else {
            Some(cookie)
        };
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a document and decode its `data` object into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: &Value,
    ) -> Result<T, PlatformError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables });

        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(endpoint = %self.endpoint, error = %e, "GraphQL Request Error");
                return Err(PlatformError::GraphqlRequestFailed(e.to_string()));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!(endpoint = %self.endpoint, error = %e, "GraphQL Request Error");
                return Err(PlatformError::GraphqlRequestFailed(e.to_string()));
            }
        };

        if !status.is_success() {
            error!(
                endpoint = %self.endpoint,
                status = %status,
                body = %truncate_body(&body),
                "GraphQL Request Error"
            );
            return Err(PlatformError::GraphqlRequestFailed(format!(
                "HTTP {} - {}",
                status,
                truncate_body(&body)
            )));
        }

        let envelope: GraphqlResponse = serde_json::from_str(&body)?;
        decode_data(envelope)
    }
}

fn decode_data<T: DeserializeOwned>(envelope: GraphqlResponse) -> Result<T, PlatformError> {
    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
        let joined = messages.join("; ");
        error!(errors = %joined, "GraphQL response carried errors");
        return Err(PlatformError::Graphql(joined));
    }

    let data = match envelope.data {
        Some(Value::Null) | None => {
            return Err(PlatformError::Graphql(
                "response contained no data".to_string(),
            ))
        }
        Some(data) => data,
    };

    debug!(data = %data, "GraphQL response");
    serde_json::from_value(data)
        .map_err(|e| PlatformError::Graphql(format!("unexpected response shape: {}", e)))
}
