//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`, falling back to `info`
pub fn init() {
    init_with_default("info");
}

/// Initialize the logging system with a default filter used when `RUST_LOG` is unset
///
/// Calling this more than once is harmless; later calls leave the first
/// logger in place.
pub fn init_with_default(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::trace!("Logger already initialized");
    }
}
