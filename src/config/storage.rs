//! Queue-message seeder configuration.

use serde::Deserialize;

/// Seeder batch sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeederConfig {
    /// Rows per message insert (and per status insert).
    /// Default: 1000
    pub batch_size: usize,
    /// Total message rows to write.
    /// Default: 1000000
    pub total_records: usize,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            total_records: 1_000_000,
        }
    }
}
