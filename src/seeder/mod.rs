//! Queue-message seeder.
//!
//! Writes large batches of synthetic `queue_message` rows, each followed by
//! a `queue_message_status` row pointing at a random existing queue.
//!
//! Message ids always come back from the store itself; nothing assumes the
//! auto-increment sequence is contiguous, so concurrent writers cannot make
//! a status row point at somebody else's message.
//!
//! The message insert and the status insert of a batch are separate
//! statements. A crash between them leaves that batch's messages without
//! status rows.

pub mod schema;

#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "mysql")]
pub use mysql::MySqlQueueStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteQueueStore;

use std::ops::RangeInclusive;
use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info};

use crate::config::SeederConfig;

/// Result type for seeder operations.
pub type Result<T> = std::result::Result<T, SeederError>;

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeederError {
    #[error("No valid queue_id found in the queue table")]
    NoQueues,

    #[error("Invalid seed plan: {0}")]
    InvalidPlan(String),

    #[error("Unsupported database URL: {0}")]
    UnsupportedDatabase(String),

    #[error("Inserted {expected} messages but the store returned {actual} ids")]
    IdMismatch { expected: usize, actual: usize },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Query build error: {0}")]
    Query(#[from] sea_query::error::Error),
}

/// A message row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub topic_name: String,
    pub body: String,
}

impl MessageRow {
    /// Placeholder text for global sequence number `index` (1-based).
    pub fn placeholder(index: usize) -> Self {
        Self {
            topic_name: format!("Dummy topic {}", index),
            body: format!("Dummy body content for message {}", index),
        }
    }
}

/// A status row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub queue_id: i64,
    pub message_id: i64,
    pub updated_at: String,
    pub status: u8,
    pub number_of_trials: u8,
}

/// Upper bound (exclusive) of the random status code and trial count.
pub const RANDOM_FILLER_BOUND: u8 = 10;

/// Storage the seeder writes to.
///
/// Implementations:
/// - `MySqlQueueStore`: the platform database
/// - `SqliteQueueStore`: local dry runs and tests
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// All existing queue ids.
    async fn queue_ids(&self) -> Result<Vec<i64>>;

    /// Insert message rows and return the ids the store generated for them.
    ///
    /// The returned ids need not be in insertion order.
    async fn insert_messages(&self, rows: &[MessageRow]) -> Result<Vec<i64>>;

    /// Insert status rows.
    async fn insert_statuses(&self, rows: &[StatusRow]) -> Result<()>;
}

/// How many rows to write and in what batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    pub batch_size: usize,
    pub total_records: usize,
}

impl SeedPlan {
    pub fn new(batch_size: usize, total_records: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(SeederError::InvalidPlan("batch_size must be positive".to_string()));
        }
        if total_records == 0 {
            return Err(SeederError::InvalidPlan("total_records must be positive".to_string()));
        }
        Ok(Self {
            batch_size,
            total_records,
        })
    }

    pub fn from_config(config: &SeederConfig) -> Result<Self> {
        Self::new(config.batch_size, config.total_records)
    }

    /// Number of batches; the last one may be short.
    pub fn batch_count(&self) -> usize {
        self.total_records.div_ceil(self.batch_size)
    }

    /// Global 1-based sequence numbers per batch.
    pub fn batches(&self) -> impl Iterator<Item = RangeInclusive<usize>> + '_ {
        (0..self.batch_count()).map(move |batch| {
            let start = batch * self.batch_size + 1;
            let end = ((batch + 1) * self.batch_size).min(self.total_records);
            start..=end
        })
    }
}

/// Totals written by a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub batches: usize,
    pub messages: usize,
    pub statuses: usize,
}

/// Drives a seed run against a store.
pub struct QueueSeeder {
    store: Arc<dyn QueueStore>,
    rng: StdRng,
}

impl QueueSeeder {
    pub fn new(store: Arc<dyn QueueStore>) -> Self {
        Self {
            store,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a fixed RNG seed (reproducible filler values).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Write `plan.total_records` messages and as many status rows.
    ///
    /// Fails before writing anything if the queue table is empty.
    pub async fn run(&mut self, plan: SeedPlan) -> Result<SeedSummary> {
        let queue_ids = self.store.queue_ids().await?;
        if queue_ids.is_empty() {
            error!("No valid queue_id found in the queue table.");
            return Err(SeederError::NoQueues);
        }

        info!(
            queues = queue_ids.len(),
            total_records = plan.total_records,
            batch_size = plan.batch_size,
            "Inserting records..."
        );

        let batch_count = plan.batch_count();
        let mut summary = SeedSummary::default();

        for (batch, range) in plan.batches().enumerate() {
            let messages: Vec<MessageRow> = range.map(MessageRow::placeholder).collect();
            let message_ids = self.store.insert_messages(&messages).await?;
            if message_ids.len() != messages.len() {
                return Err(SeederError::IdMismatch {
                    expected: messages.len(),
                    actual: message_ids.len(),
                });
            }

            let updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
            let statuses = status_rows(&queue_ids, &message_ids, &updated_at, &mut self.rng);
            self.store.insert_statuses(&statuses).await?;

            summary.batches += 1;
            summary.messages += messages.len();
            summary.statuses += statuses.len();

            info!("Inserted batch {} of {}", batch + 1, batch_count);
        }

        info!(
            messages = summary.messages,
            statuses = summary.statuses,
            "Insertion complete."
        );
        Ok(summary)
    }
}

/// One status row per message id, each assigned a random queue.
///
/// `queue_ids` must not be empty.
pub fn status_rows<R: Rng + ?Sized>(
    queue_ids: &[i64],
    message_ids: &[i64],
    updated_at: &str,
    rng: &mut R,
) -> Vec<StatusRow> {
    message_ids
        .iter()
        .map(|&message_id| StatusRow {
            queue_id: queue_ids[rng.random_range(0..queue_ids.len())],
            message_id,
            updated_at: updated_at.to_string(),
            status: rng.random_range(0..RANDOM_FILLER_BOUND),
            number_of_trials: rng.random_range(0..RANDOM_FILLER_BOUND),
        })
        .collect()
}

/// Connect to the store named by a database URL.
///
/// `mysql://` and `mariadb://` URLs need the `mysql` feature, `sqlite:` URLs
/// the `sqlite` feature.
pub async fn connect(url: &str) -> Result<Arc<dyn QueueStore>> {
    #[cfg(feature = "mysql")]
    if url.starts_with("mysql://") || url.starts_with("mariadb://") {
        let pool = sqlx::MySqlPool::connect(url).await?;
        return Ok(Arc::new(MySqlQueueStore::new(pool)));
    }

    #[cfg(feature = "sqlite")]
    if url.starts_with("sqlite:") {
        let pool = sqlx::SqlitePool::connect(url).await?;
        return Ok(Arc::new(SqliteQueueStore::new(pool)));
    }

    let scheme = url.split(':').next().unwrap_or_default();
    Err(SeederError::UnsupportedDatabase(scheme.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory store that hands out ids with gaps, like an auto-increment
    /// column shared with other writers.
    #[derive(Default)]
    struct GappyStore {
        queues: Vec<i64>,
        next_id: Mutex<i64>,
        messages: Mutex<Vec<(i64, MessageRow)>>,
        statuses: Mutex<Vec<StatusRow>>,
    }

    impl GappyStore {
        fn with_queues(queues: Vec<i64>) -> Self {
            Self {
                queues,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl QueueStore for GappyStore {
        async fn queue_ids(&self) -> Result<Vec<i64>> {
            Ok(self.queues.clone())
        }

        async fn insert_messages(&self, rows: &[MessageRow]) -> Result<Vec<i64>> {
            let mut next = self.next_id.lock().unwrap();
            let mut messages = self.messages.lock().unwrap();
            let mut ids = Vec::with_capacity(rows.len());
            for row in rows {
                // Another writer took the id in between
                *next += 2;
                messages.push((*next, row.clone()));
                ids.push(*next);
            }
            ids.reverse();
            Ok(ids)
        }

        async fn insert_statuses(&self, rows: &[StatusRow]) -> Result<()> {
            self.statuses.lock().unwrap().extend_from_slice(rows);
            Ok(())
        }
    }

    #[test]
    fn test_plan_rejects_zero() {
        assert!(matches!(SeedPlan::new(0, 10), Err(SeederError::InvalidPlan(_))));
        assert!(matches!(SeedPlan::new(10, 0), Err(SeederError::InvalidPlan(_))));
    }

    #[test]
    fn test_plan_batches_exact() {
        let plan = SeedPlan::new(3, 9).unwrap();
        let batches: Vec<_> = plan.batches().collect();
        assert_eq!(batches, vec![1..=3, 4..=6, 7..=9]);
    }

    #[test]
    fn test_plan_batches_remainder() {
        let plan = SeedPlan::new(4, 10).unwrap();
        assert_eq!(plan.batch_count(), 3);
        let batches: Vec<_> = plan.batches().collect();
        assert_eq!(batches, vec![1..=4, 5..=8, 9..=10]);
    }

    #[test]
    fn test_plan_from_config_defaults() {
        let plan = SeedPlan::from_config(&SeederConfig::default()).unwrap();
        assert_eq!(plan.batch_count(), 1000);
    }

    #[test]
    fn test_placeholder_text() {
        let row = MessageRow::placeholder(42);
        assert_eq!(row.topic_name, "Dummy topic 42");
        assert_eq!(row.body, "Dummy body content for message 42");
    }

    #[test]
    fn test_status_rows_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let queues = vec![3, 5, 8];
        let messages: Vec<i64> = (100..300).collect();
        let rows = status_rows(&queues, &messages, "2026-01-01 00:00:00", &mut rng);

        assert_eq!(rows.len(), 200);
        for (row, message_id) in rows.iter().zip(&messages) {
            assert_eq!(row.message_id, *message_id);
            assert!(queues.contains(&row.queue_id));
            assert!(row.status < RANDOM_FILLER_BOUND);
            assert!(row.number_of_trials < RANDOM_FILLER_BOUND);
            assert_eq!(row.updated_at, "2026-01-01 00:00:00");
        }
        // Uniform picks over 200 rows touch every queue
        let used: HashSet<i64> = rows.iter().map(|r| r.queue_id).collect();
        assert_eq!(used.len(), 3);
    }

    #[tokio::test]
    async fn test_run_uses_returned_ids() {
        let store = Arc::new(GappyStore::with_queues(vec![1, 2]));
        let mut seeder = QueueSeeder::new(store.clone()).with_seed(1);

        let summary = seeder.run(SeedPlan::new(4, 10).unwrap()).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                batches: 3,
                messages: 10,
                statuses: 10
            }
        );

        let messages = store.messages.lock().unwrap();
        let statuses = store.statuses.lock().unwrap();
        let message_ids: HashSet<i64> = messages.iter().map(|(id, _)| *id).collect();
        let status_ids: HashSet<i64> = statuses.iter().map(|s| s.message_id).collect();
        assert_eq!(message_ids, status_ids);
        assert_eq!(statuses.len(), 10);

        let topics: Vec<&str> = messages.iter().map(|(_, m)| m.topic_name.as_str()).collect();
        let expected: Vec<String> = (1..=10).map(|i| format!("Dummy topic {}", i)).collect();
        assert_eq!(topics, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_run_without_queues_writes_nothing() {
        let store = Arc::new(GappyStore::default());
        let mut seeder = QueueSeeder::new(store.clone());

        let result = seeder.run(SeedPlan::new(10, 100).unwrap()).await;

        assert!(matches!(result, Err(SeederError::NoQueues)));
        assert!(store.messages.lock().unwrap().is_empty());
        assert!(store.statuses.lock().unwrap().is_empty());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SeederError::NoQueues.to_string(),
            "No valid queue_id found in the queue table"
        );
        assert_eq!(
            SeederError::IdMismatch {
                expected: 3,
                actual: 2
            }
            .to_string(),
            "Inserted 3 messages but the store returned 2 ids"
        );
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let result = connect("postgres://localhost/db").await;
        assert!(matches!(result, Err(SeederError::UnsupportedDatabase(s)) if s == "postgres"));
    }
}
