//! Logging setup and re-exports

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system with an info-level default filter
///
/// Respects `RUST_LOG` when set. Call once from the binary, before any
/// engine construction.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
