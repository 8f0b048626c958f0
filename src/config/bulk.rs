//! Bulk product creation overrides.

use serde::Deserialize;

/// Optional overrides for a bulk creation variant.
///
/// Each binary picks a named variant; these values only replace the
/// variant's defaults when set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BulkConfig {
    /// Number of bundle products to create.
    pub count: Option<usize>,
    /// In-flight limit for the bounded variant. Ignored by sequential runs.
    pub concurrency: Option<usize>,
}
