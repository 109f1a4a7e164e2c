// storage/mod.rs
// Storage backends and database bootstrap

pub mod backend;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod sqlite;
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use backend::{SaveContext, StorageBackend};
pub use memory::InMemoryBackend;
pub use migrations::run_migrations;
pub use models::Record;
pub use pool::init_db_pool;
pub use sqlite::SqliteBackend;
