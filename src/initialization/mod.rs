//! Application initialization.
//!
//! Logger setup lives here; database bootstrap is in `storage`.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
