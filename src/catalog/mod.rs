//! Catalog fixtures.
//!
//! Creates the shared simple product and the bundle products that link to
//! it, either one at a time or through a bounded pool of in-flight calls.

pub mod bulk;
pub mod product;
pub mod report;

pub use bulk::{BulkCreator, BulkPlan, BulkVariant, BundleSpec, ConcurrencyPolicy};
pub use product::{
    BundleOption, ProductLink, ProductRecord, ProductRequest, ProductStatus, ProductType,
    SHARED_SIMPLE_SKU,
};
pub use report::{CreationAttempt, CreationOutcome, CreationReport};

use async_trait::async_trait;

use crate::platform::PlatformError;

/// Product-creation seam.
///
/// Implementations:
/// - `CatalogClient`: the platform's REST admin API
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Create one product.
    async fn create_product(&self, request: &ProductRequest) -> Result<ProductRecord, PlatformError>;
}
