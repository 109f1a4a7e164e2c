// storage/models.rs
// Record payload accepted by the front end and persisted by the backends

use serde::{Deserialize, Serialize};

/// A single record submitted by a producer.
///
/// Maps to the `records` table: `name` is stored as-is, the row id is assigned
/// by the database. The engine itself never inspects the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Value stored in the `name` column
    pub name: String,
}

impl Record {
    /// Record with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Record { name: name.into() }
    }
}
