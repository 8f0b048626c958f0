//! Bulk bundle creation.
//!
//! Two named variants exist because the fixtures they produce differ:
//! enabled bundles created one by one, or disabled bundles created through a
//! bounded pool. Both create the shared simple product first.
//!
//! ## Bounded pool
//! ```text
//! bundles ──> [slot 1] ──┐
//!         ──> [slot 2] ──┼──> report
//!         ──> [slot K] ──┘
//! ```
//! A new call starts as soon as any slot frees, so at most K calls are ever
//! in flight and a slow call only holds its own slot.

use futures::stream::{self, StreamExt};
use tracing::{error, info};

use super::product::{
    ProductRequest, ProductStatus, SHARED_SIMPLE_NAME, SHARED_SIMPLE_PRICE, SHARED_SIMPLE_SKU,
};
use super::report::{CreationAttempt, CreationReport};
use super::CatalogApi;
use crate::config::BulkConfig;

/// In-flight limit of the concurrent variant.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// How bundle calls are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyPolicy {
    /// One call at a time, each awaited before the next starts.
    Sequential,
    /// At most `limit` calls in flight.
    Bounded { limit: usize },
}

impl ConcurrencyPolicy {
    /// Maximum number of calls in flight under this policy.
    pub fn limit(&self) -> usize {
        match self {
            ConcurrencyPolicy::Sequential => 1,
            ConcurrencyPolicy::Bounded { limit } => (*limit).max(1),
        }
    }
}

/// Named bulk creation variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkVariant {
    /// 1000 enabled bundles, `bundle-product-{i}`, sequential.
    SequentialEnabled,
    /// 20000 disabled bundles, `bundle-product-dis-{i}`, at most 100 in flight.
    ConcurrentDisabled,
}

impl BulkVariant {
    pub fn name(&self) -> &'static str {
        match self {
            BulkVariant::SequentialEnabled => "sequential-enabled",
            BulkVariant::ConcurrentDisabled => "concurrent-disabled",
        }
    }

    /// The variant's default plan.
    pub fn plan(&self) -> BulkPlan {
        match self {
            BulkVariant::SequentialEnabled => BulkPlan {
                count: 1000,
                sku_prefix: "bundle-product-".to_string(),
                name_prefix: "Bundle Product".to_string(),
                status: ProductStatus::Enabled,
                concurrency: ConcurrencyPolicy::Sequential,
            },
            BulkVariant::ConcurrentDisabled => BulkPlan {
                count: 20_000,
                sku_prefix: "bundle-product-dis-".to_string(),
                name_prefix: "Bundle Product Dis".to_string(),
                status: ProductStatus::Disabled,
                concurrency: ConcurrencyPolicy::Bounded {
                    limit: DEFAULT_CONCURRENCY,
                },
            },
        }
    }
}

/// What a bulk run creates and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkPlan {
    /// Number of bundles.
    pub count: usize,
    /// SKU prefix; the 1-based index is appended.
    pub sku_prefix: String,
    /// Name prefix; a space and the index are appended.
    pub name_prefix: String,
    /// Status given to every bundle.
    pub status: ProductStatus,
    /// Call scheduling.
    pub concurrency: ConcurrencyPolicy,
}

/// One bundle to create.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleSpec {
    pub sku: String,
    pub name: String,
    pub price: f64,
}

impl BulkPlan {
    /// Apply configuration overrides.
    ///
    /// `concurrency` only changes the limit of a bounded plan; a sequential
    /// plan stays sequential.
    pub fn with_overrides(mut self, overrides: &BulkConfig) -> Self {
        if let Some(count) = overrides.count {
            self.count = count;
        }
        if let (Some(limit), ConcurrencyPolicy::Bounded { .. }) =
            (overrides.concurrency, self.concurrency)
        {
            self.concurrency = ConcurrencyPolicy::Bounded { limit };
        }
        self
    }

    /// Bundle `i` for `i` in `1..=count`, priced `100 + i`.
    pub fn bundles(&self) -> impl Iterator<Item = BundleSpec> + '_ {
        (1..=self.count).map(move |i| BundleSpec {
            sku: format!("{}{}", self.sku_prefix, i),
            name: format!("{} {}", self.name_prefix, i),
            price: 100.0 + i as f64,
        })
    }
}

/// Drives a bulk run against a catalog API.
pub struct BulkCreator<'a, A: CatalogApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: CatalogApi + ?Sized> BulkCreator<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Create the shared simple product, then every bundle in the plan.
    ///
    /// Failed calls are logged and recorded; the run always attempts every
    /// product.
    pub async fn run(&self, plan: &BulkPlan) -> CreationReport {
        info!(
            count = plan.count,
            status = %plan.status,
            concurrency = plan.concurrency.limit(),
            "Starting bulk product creation"
        );

        let mut report = CreationReport::new();
        report.record(self.create_simple().await);

        match plan.concurrency {
            ConcurrencyPolicy::Sequential => {
                for spec in plan.bundles() {
                    let attempt = self.create_bundle(spec, plan.status).await;
                    report.record(attempt);
                }
            }
            ConcurrencyPolicy::Bounded { .. } => {
                let attempts: Vec<CreationAttempt> = stream::iter(plan.bundles())
                    .map(|spec| self.create_bundle(spec, plan.status))
                    .buffer_unordered(plan.concurrency.limit())
                    .collect()
                    .await;
                report.extend(attempts);
            }
        }

        report.log_summary();
        report
    }

    /// Create the simple product every bundle links to.
    pub async fn create_simple(&self) -> CreationAttempt {
        let request =
            ProductRequest::simple(SHARED_SIMPLE_SKU, SHARED_SIMPLE_NAME, SHARED_SIMPLE_PRICE);
        self.create(&request).await
    }

    /// Create one bundle linking the shared simple product.
    pub async fn create_bundle(&self, spec: BundleSpec, status: ProductStatus) -> CreationAttempt {
        let request =
            ProductRequest::bundle(&spec.sku, &spec.name, spec.price, status, SHARED_SIMPLE_SKU);
        self.create(&request).await
    }

    async fn create(&self, request: &ProductRequest) -> CreationAttempt {
        let sku = request.sku();
        match self.api.create_product(request).await {
            Ok(record) => {
                info!(
                    sku = %sku,
                    id = ?record.id,
                    product_type = %request.product.type_id.as_str(),
                    "Product created"
                );
                CreationAttempt::created(sku)
            }
            Err(e) => {
                error!(sku = %sku, error = %e, "Error creating product");
                CreationAttempt::failed(sku, e.to_string())
            }
        }
    }
}
