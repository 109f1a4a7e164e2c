// Shared test helpers for database setup and service startup.

use std::net::SocketAddr;
use std::path::Path;

use sqlx::SqlitePool;

use record_batcher::Config;

/// Returns a `sqlite:` URL for a file inside `dir`.
pub fn database_url(dir: &Path) -> String {
    format!("sqlite:{}", dir.join("records.db").to_string_lossy())
}

/// Configuration pointing at `database_url`, with a short flush interval.
#[allow(dead_code)] // Used by other test files
pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        shard_count: 4,
        flush_interval_ms: 50,
        chunk_size: 10,
        max_connections: 4,
        ..Config::default()
    }
}

/// Counts rows in the records table.
#[allow(dead_code)] // Used by other test files
pub async fn count_records(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM records")
        .fetch_one(pool)
        .await
        .expect("Failed to count records")
}

/// Returns every stored name, in insertion order.
#[allow(dead_code)] // Used by other test files
pub async fn record_names(pool: &SqlitePool) -> Vec<String> {
    sqlx::query_scalar("SELECT name FROM records ORDER BY id")
        .fetch_all(pool)
        .await
        .expect("Failed to read records")
}

/// Base URL for a server bound to `addr`.
#[allow(dead_code)] // Used by other test files
pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{}", addr)
}
