//! SQLite QueueStore implementation.

use async_trait::async_trait;
use sea_query::{Query, SqliteQueryBuilder};
use sqlx::{Row, SqlitePool};

use super::schema::{message_insert, status_insert, Queue, QueueMessage, CREATE_QUEUE_TABLES_SQLITE};
use super::{MessageRow, QueueStore, Result, StatusRow};

/// SQLite implementation of QueueStore.
///
/// Generated ids come from `RETURNING id`.
pub struct SqliteQueueStore {
    pool: SqlitePool,
}

impl SqliteQueueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the queue tables if they do not exist.
    pub async fn init(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_QUEUE_TABLES_SQLITE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert a queue and return its id.
    pub async fn add_queue(&self, name: &str) -> Result<i64> {
        let query = Query::insert()
            .into_table(Queue::Table)
            .columns([Queue::Name])
            .values([name.into()])?
            .returning_col(Queue::Id)
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_one(&self.pool).await?;
        Ok(row.try_get(0)?)
    }
}

fn insert_messages_sql(rows: &[MessageRow]) -> Result<String> {
    Ok(message_insert(rows)?
        .returning_col(QueueMessage::Id)
        .to_string(SqliteQueryBuilder))
}

#[async_trait]
impl QueueStore for SqliteQueueStore {
    async fn queue_ids(&self) -> Result<Vec<i64>> {
        let query = Query::select()
            .column(Queue::Id)
            .from(Queue::Table)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| row.try_get::<i64, _>(0).map_err(Into::into))
            .collect()
    }

    async fn insert_messages(&self, rows: &[MessageRow]) -> Result<Vec<i64>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let query = insert_messages_sql(rows)?;

        let returned = sqlx::query(&query).fetch_all(&self.pool).await?;
        returned
            .iter()
            .map(|row| row.try_get::<i64, _>(0).map_err(Into::into))
            .collect()
    }

    async fn insert_statuses(&self, rows: &[StatusRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let query = status_insert(rows)?.to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&self.pool).await?;
        Ok(())
    }
}
