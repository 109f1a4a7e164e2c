//! Summary logging.

use log::info;

use crate::error_handling::{FlushCounter, FlushStats};

/// Logs the totals accumulated over the lifetime of the service.
///
/// # Arguments
///
/// * `start_time` - When the service started accepting records
/// * `stats` - Flush counters shared with the scheduler
pub fn log_flush_summary(start_time: std::time::Instant, stats: &FlushStats) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let flushed = stats.get(FlushCounter::RecordsFlushed);
    let rate = if elapsed_secs > 0.0 {
        flushed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Flushed {} records in {} flushes over {:.2} seconds (~{:.2} records/sec)",
        flushed,
        stats.get(FlushCounter::Flushes),
        elapsed_secs,
        rate
    );

    let dropped = stats.get(FlushCounter::RecordsDropped);
    if dropped > 0 {
        log::warn!(
            "Dropped {} records across {} failed chunks",
            dropped,
            stats.get(FlushCounter::ChunksFailed)
        );
    }
}
