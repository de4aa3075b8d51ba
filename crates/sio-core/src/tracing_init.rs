//! Shared tracing/logging initialization.
//!
//! Binaries embedding `sio` streams can use this to surface the per-record
//! `trace!` and terminal-state `debug!` events emitted by the readers.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};

/// Initialise the global tracing subscriber.
///
/// * `default_filter` -- default `RUST_LOG` value when the env-var is not set
///   (e.g. `"sio_core=debug"`).
/// * `log_json` -- when `true`, emit structured JSON log lines instead of the
///   human-readable format.
///
/// Fails with [`Error::Tracing`] if a global subscriber is already installed.
pub fn init_tracing(default_filter: &str, log_json: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
    );
    let installed = if log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    };
    installed.map_err(|e| Error::Tracing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported_not_panicking() {
        // Another test may already have installed one; either way the
        // second call must fail.
        let _ = init_tracing("sio_core=trace", false);
        let second = init_tracing("sio_core=trace", true);
        assert!(matches!(second, Err(Error::Tracing(_))));
    }
}
