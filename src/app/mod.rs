//! Main application modules.
//!
//! This module provides signal handling, shutdown orchestration and summary
//! logging used by the service entry point.

pub mod logging;
pub mod shutdown;

// Re-export public API
pub use logging::log_flush_summary;
pub use shutdown::{shutdown_gracefully, spawn_signal_listener, wait_for_shutdown_signal};
