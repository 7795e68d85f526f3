//! Logging setup shared by binaries and test suites embedding the checkout codec.
//!
//! The codec crates only emit `tracing` events; nothing is printed until a
//! subscriber is installed through [`init`] or [`init_with`].

pub mod tracing;

pub use crate::tracing::{LogConfig, LogFormat, ObservabilityError};

/// Install the default JSON subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call multiple times; only the first call installs anything.
pub fn init() {
    let _ = init_with(&LogConfig::from_env());
}

/// Install a subscriber for `config`.
pub fn init_with(config: &LogConfig) -> Result<(), ObservabilityError> {
    crate::tracing::install(config)
}
