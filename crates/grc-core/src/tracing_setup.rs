//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

static INIT: Once = Once::new();

/// Initialize the register's tracing/logging system.
///
/// `RUST_LOG` takes precedence over `logging.level`. An invalid configured
/// directive falls back to `info`.
///
/// Idempotent: only the first call installs a subscriber, and an already
/// installed global subscriber (e.g. from a test harness) is left in place.
pub fn init_tracing(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config.effective_level()))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let registry = tracing_subscriber::registry().with(filter);
        let result = match config.effective_format() {
            LogFormat::Json => registry
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .try_init(),
            LogFormat::Text => registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init(),
        };
        if result.is_err() {
            tracing::debug!("global tracing subscriber already set");
        }
    });
}
