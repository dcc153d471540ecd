//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::{RustStackError, RustStackResult};

/// Initialize the global tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `log_level`. Calling this
/// more than once returns an error instead of panicking.
pub fn init_tracing(log_level: &str) -> RustStackResult<()> {
    let filter = build_filter(log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| RustStackError::Internal(anyhow::anyhow!("failed to install subscriber: {e}")))
}

fn build_filter(log_level: &str) -> RustStackResult<EnvFilter> {
    if std::env::var("RUST_LOG").is_ok() {
        return Ok(EnvFilter::from_default_env());
    }
    EnvFilter::try_new(log_level)
        .map_err(|e| RustStackError::Config(format!("invalid log level filter {log_level}: {e}")))
}
