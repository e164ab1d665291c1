//! Logging initialization.
//!
//! Uses the `tracing` ecosystem with either human-readable or JSON output.
//! Logs go to stderr; stdout is reserved for command output.

use crate::config::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging from the `[logging]` config section.
///
/// `verbose_override` (DEBUG level) and `json_override` come from CLI flags
/// and win over the config file. The `RUST_LOG` environment variable
/// overrides the level either way.
pub fn init_from_config(config: &LoggingConfig, verbose_override: bool, json_override: bool) {
    let level = if verbose_override {
        "debug"
    } else {
        config.level.as_str()
    };
    let json_format = json_override || config.format == "json";
    init_with_level(level, json_format);
}

fn init_with_level(default_level: &str, json_format: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}
