//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured level. Only the first
//! subscriber installed in a process takes effect; later calls report
//! `false` and leave it in place.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

fn filter_for(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns whether this call installed it.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter_for(config))
        .with_thread_ids(config.thread_ids)
        .with_thread_names(config.thread_ids);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(
            builder
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };
    installed.is_ok()
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() -> bool {
    init_logging(&LoggingConfig::default())
}
