//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Verbosity follows `RUST_LOG`; when it is unset only errors are shown.
/// Calling this more than once is harmless (later calls are ignored), which
/// keeps tests that share a process from panicking.
pub fn init() {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .try_init();
}
