//! Queue table definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.

use sea_query::{Iden, InsertStatement, Query};

use super::{MessageRow, Result, StatusRow};

/// Queue table schema. Read-only for the seeder.
#[derive(Iden)]
pub enum Queue {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "name"]
    Name,
}

/// Queue message table schema.
#[derive(Iden)]
pub enum QueueMessage {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "topic_name"]
    TopicName,
    #[iden = "body"]
    Body,
}

/// Queue message status table schema.
#[derive(Iden)]
pub enum QueueMessageStatus {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "queue_id"]
    QueueId,
    #[iden = "message_id"]
    MessageId,
    #[iden = "updated_at"]
    UpdatedAt,
    #[iden = "status"]
    Status,
    #[iden = "number_of_trials"]
    NumberOfTrials,
}

/// Multi-row insert of message rows. Backends render it to SQL before
/// touching the pool.
pub(super) fn message_insert(rows: &[MessageRow]) -> Result<InsertStatement> {
    let mut insert = Query::insert();
    insert
        .into_table(QueueMessage::Table)
        .columns([QueueMessage::TopicName, QueueMessage::Body]);
    for row in rows {
        insert.values([row.topic_name.as_str().into(), row.body.as_str().into()])?;
    }
    Ok(insert)
}

/// Multi-row insert of status rows.
pub(super) fn status_insert(rows: &[StatusRow]) -> Result<InsertStatement> {
    let mut insert = Query::insert();
    insert.into_table(QueueMessageStatus::Table).columns([
        QueueMessageStatus::QueueId,
        QueueMessageStatus::MessageId,
        QueueMessageStatus::UpdatedAt,
        QueueMessageStatus::Status,
        QueueMessageStatus::NumberOfTrials,
    ]);
    for row in rows {
        insert.values([
            row.queue_id.into(),
            row.message_id.into(),
            row.updated_at.as_str().into(),
            row.status.into(),
            row.number_of_trials.into(),
        ])?;
    }
    Ok(insert)
}

/// SQLite DDL for the three queue tables.
///
/// The platform owns the real MySQL schema; this mirror exists for local
/// dry runs and tests.
pub const CREATE_QUEUE_TABLES_SQLITE: &str = r#"
CREATE TABLE IF NOT EXISTS queue (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS queue_message (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic_name TEXT NOT NULL,
    body TEXT
);

CREATE TABLE IF NOT EXISTS queue_message_status (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    queue_id INTEGER NOT NULL REFERENCES queue(id),
    message_id INTEGER NOT NULL REFERENCES queue_message(id),
    updated_at TEXT NOT NULL,
    status INTEGER NOT NULL,
    number_of_trials INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_queue_message_status_message ON queue_message_status(message_id);
"#;
