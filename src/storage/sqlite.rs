//! SQLite storage backend.
//!
//! Each save turns one chunk into a single multi-row `INSERT`.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::backend::{SaveContext, StorageBackend};
use super::models::Record;
use crate::config::RECORDS_TABLE;
use crate::error_handling::StorageError;

/// Writes records into the `records` table.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: Arc<SqlitePool>,
}

impl SqliteBackend {
    /// Backend writing through `pool`.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        SqliteBackend { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageBackend<Record> for SqliteBackend {
    async fn save(&self, ctx: &SaveContext, records: &[Record]) -> Result<(), StorageError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("INSERT INTO {} (name) ", RECORDS_TABLE));
        builder.push_values(records, |mut row, record| {
            row.push_bind(record.name.as_str());
        });
        let query = builder.build();

        tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(StorageError::Cancelled),
            result = query.execute(self.pool.as_ref()) => {
                let done = result?;
                log::trace!("Inserted {} rows", done.rows_affected());
                Ok(())
            }
        }
    }
}
