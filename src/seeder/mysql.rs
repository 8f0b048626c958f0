//! MySQL QueueStore implementation.
//!
//! MySQL has no `RETURNING`. After a multi-row insert the connection's
//! `LAST_INSERT_ID()` is the id of the first row; the batch's ids are read
//! back from there by topic name instead of assuming the range is contiguous,
//! which it is not under `innodb_autoinc_lock_mode = 2`.

use async_trait::async_trait;
use sea_query::{Alias, Expr, Func, MysqlQueryBuilder, Order, Query};
use sqlx::{MySqlPool, Row};

use super::schema::{message_insert, status_insert, Queue, QueueMessage};
use super::{MessageRow, QueueStore, Result, SeederError, StatusRow};

/// MySQL implementation of QueueStore.
pub struct MySqlQueueStore {
    pool: MySqlPool,
}

impl MySqlQueueStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

// Ids may be declared unsigned; decode everything as signed BIGINT.
fn signed(column: QueueMessage) -> sea_query::FunctionCall {
    Func::cast_as(Expr::col(column), Alias::new("SIGNED"))
}

/// Ids of the batch just inserted, starting at the connection's
/// `LAST_INSERT_ID()`.
fn read_back_sql(first_id: u64, rows: &[MessageRow]) -> String {
    let topics: Vec<&str> = rows.iter().map(|row| row.topic_name.as_str()).collect();
    Query::select()
        .expr(signed(QueueMessage::Id))
        .from(QueueMessage::Table)
        .and_where(Expr::col(QueueMessage::Id).gte(first_id))
        .and_where(Expr::col(QueueMessage::TopicName).is_in(topics))
        .order_by(QueueMessage::Id, Order::Asc)
        .limit(rows.len() as u64)
        .to_string(MysqlQueryBuilder)
}

#[async_trait]
impl QueueStore for MySqlQueueStore {
    async fn queue_ids(&self) -> Result<Vec<i64>> {
        let query = Query::select()
            .expr(Func::cast_as(Expr::col(Queue::Id), Alias::new("SIGNED")))
            .from(Queue::Table)
            .to_string(MysqlQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| row.try_get::<i64, _>(0).map_err(Into::into))
            .collect()
    }

    async fn insert_messages(&self, rows: &[MessageRow]) -> Result<Vec<i64>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let query = message_insert(rows)?.to_string(MysqlQueryBuilder);

        // LAST_INSERT_ID is per connection
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(&query).execute(&mut *conn).await?;
        let read_back = read_back_sql(result.last_insert_id(), rows);

        let returned = sqlx::query(&read_back).fetch_all(&mut *conn).await?;
        let ids = returned
            .iter()
            .map(|row| row.try_get::<i64, _>(0))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if ids.len() != rows.len() {
            return Err(SeederError::IdMismatch {
                expected: rows.len(),
                actual: ids.len(),
            });
        }
        Ok(ids)
    }

    async fn insert_statuses(&self, rows: &[StatusRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let query = status_insert(rows)?.to_string(MysqlQueryBuilder);

        sqlx::query(&query).execute(&self.pool).await?;
        Ok(())
    }
}
