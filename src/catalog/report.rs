//! Per-attempt outcome collection for bulk runs.

use tracing::{info, warn};

/// Result of one creation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationOutcome {
    Created,
    Failed(String),
}

/// One attempted SKU and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationAttempt {
    pub sku: String,
    pub outcome: CreationOutcome,
}

impl CreationAttempt {
    pub fn created(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            outcome: CreationOutcome::Created,
        }
    }

    pub fn failed(sku: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            outcome: CreationOutcome::Failed(reason.into()),
        }
    }

    pub fn is_created(&self) -> bool {
        self.outcome == CreationOutcome::Created
    }
}

/// Collected outcomes of a bulk run.
///
/// Attempts are stored in completion order, which for bounded runs is not
/// the submission order.
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    attempts: Vec<CreationAttempt>,
}

impl CreationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, attempt: CreationAttempt) {
        self.attempts.push(attempt);
    }

    pub fn attempts(&self) -> &[CreationAttempt] {
        &self.attempts
    }

    pub fn attempted(&self) -> usize {
        self.attempts.len()
    }

    pub fn succeeded(&self) -> usize {
        self.attempts.iter().filter(|a| a.is_created()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    /// Attempts that failed, with their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attempts.iter().filter_map(|a| match &a.outcome {
            CreationOutcome::Failed(reason) => Some((a.sku.as_str(), reason.as_str())),
            CreationOutcome::Created => None,
        })
    }

    /// Emit the end-of-run summary line.
    pub fn log_summary(&self) {
        if self.failed() == 0 {
            info!(
                attempted = self.attempted(),
                succeeded = self.succeeded(),
                "Product creation complete"
            );
        } else {
            warn!(
                attempted = self.attempted(),
                succeeded = self.succeeded(),
                failed = self.failed(),
                "Product creation complete with failures"
            );
        }
    }
}

impl Extend<CreationAttempt> for CreationReport {
    fn extend<T: IntoIterator<Item = CreationAttempt>>(&mut self, iter: T) {
        self.attempts.extend(iter);
    }
}
