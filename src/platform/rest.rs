//! REST admin API client for catalog products.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::token::AdminToken;
use super::{truncate_body, PlatformError};
use crate::catalog::{CatalogApi, ProductRecord, ProductRequest};
use crate::config::PlatformConfig;

/// Authenticated catalog client.
///
/// Every request carries `Authorization: Bearer {token}`.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    config: PlatformConfig,
    token: AdminToken,
}

impl CatalogClient {
    /// Create a client from an already-obtained admin token.
    pub fn new(client: Client, config: PlatformConfig, token: AdminToken) -> Self {
        Self {
            client,
            config,
            token,
        }
    }

    /// Create a product via `POST /rest/V1/products`.
    pub async fn create(&self, request: &ProductRequest) -> Result<ProductRecord, PlatformError> {
        let url = self.config.rest_url("V1/products");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.as_str())
            .json(request)
            .send()
            .await?;

        let record: ProductRecord = Self::decode(response, &url).await?;
        debug!(sku = %record.sku, id = ?record.id, "Product stored");
        Ok(record)
    }

    /// Read a product back via `GET /rest/V1/products/{sku}`.
    pub async fn get(&self, sku: &str) -> Result<ProductRecord, PlatformError> {
        let url = product_url(&self.config, sku)?;

        let response = self
            .client
            .get(url.as_str())
            .bearer_auth(self.token.as_str())
            .send()
            .await?;

        Self::decode(response, url.as_str()).await
    }

    async fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, PlatformError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                url = %url,
                status = %status,
                body = %truncate_body(&body),
                "REST call failed"
            );
            return Err(PlatformError::Status { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// `/rest/V1/products/{sku}` with the SKU as one encoded path segment.
fn product_url(config: &PlatformConfig, sku: &str) -> Result<Url, PlatformError> {
    let base = config.rest_url("V1/products");
    let mut url =
        Url::parse(&base).map_err(|e| PlatformError::InvalidUrl(format!("{}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| PlatformError::InvalidUrl(base.clone()))?
        .push(sku);
    Ok(url)
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn create_product(&self, request: &ProductRequest) -> Result<ProductRecord, PlatformError> {
        self.create(request).await
    }
}
