//! Optional log output for app builds.
//!
//! Library code only emits `tracing` events. Apps that want them on stderr
//! (Xcode console, logcat via stderr redirect) call `init_logging` once.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset and no filter is passed.
pub const DEFAULT_FILTER: &str = "gpay_lib=info,gpay_mobile=info";

/// Install a global `tracing` subscriber.
///
/// `filter` uses `EnvFilter` syntax (e.g. `"gpay_lib=debug"`). Returns
/// `false` if a subscriber was already installed.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) -> bool {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .try_init()
        .is_ok()
}
