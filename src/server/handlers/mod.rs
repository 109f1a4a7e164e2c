//! HTTP handlers.

mod ping;
mod status;

pub use ping::ping_handler;
pub use status::status_handler;
