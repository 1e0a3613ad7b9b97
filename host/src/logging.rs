//! Tracing subscriber setup for the host binary.

use tracing_subscriber::EnvFilter;

use crate::HostError;

/// Build the event filter: `RUST_LOG` when set, `default_directive` otherwise
pub fn build_filter(default_directive: &str) -> Result<EnvFilter, HostError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|e| HostError::Logging(format!("invalid log level '{}': {}", default_directive, e))),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for maze pictures and JSON.
pub fn init_logging(default_directive: &str) -> Result<(), HostError> {
    let filter = build_filter(default_directive)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| HostError::Logging(e.to_string()))
}
