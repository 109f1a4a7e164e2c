//! Shared test helpers for storage module tests.
//!
//! This module provides common utilities for database setup and inspection
//! used across the storage and flush tests.

#[cfg(test)]
use sqlx::SqlitePool;

#[cfg(test)]
use crate::config::RECORDS_TABLE;
#[cfg(test)]
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database with a single connection so every query sees
/// the same database.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Counts rows in the records table.
#[cfg(test)]
pub async fn count_records(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", RECORDS_TABLE))
        .fetch_one(pool)
        .await
        .expect("Failed to count records")
}

/// Returns every stored name in insertion order.
#[cfg(test)]
pub async fn record_names(pool: &SqlitePool) -> Vec<String> {
    sqlx::query_scalar(&format!("SELECT name FROM {} ORDER BY id", RECORDS_TABLE))
        .fetch_all(pool)
        .await
        .expect("Failed to read records")
}
