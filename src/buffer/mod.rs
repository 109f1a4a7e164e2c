//! In-memory record buffering.
//!
//! Producers push into a `BufferEngine`, which routes each record to one of a
//! fixed number of `Shard`s through the `Distributor`. The flush scheduler is
//! the only reader: it drains every shard and hands the batches to storage.

mod distributor;
mod engine;
mod shard;

pub use distributor::Distributor;
pub use engine::BufferEngine;
pub use shard::Shard;
