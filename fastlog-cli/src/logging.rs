//! Logging initialization for the fastlog CLI.
//!
//! Configures `tracing-subscriber` based on the `[general]` section
//! of `FastlogConfig`. Diagnostics go to stderr so stdout carries
//! only the report.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fastlog_core::config::GeneralConfig;

use crate::error::CliError;

/// Pick the filter directive used when `RUST_LOG` is not set.
///
/// Precedence: `--log-level` > `--verbose` (debug) > config `log_level`.
pub fn effective_level<'a>(
    config: &'a GeneralConfig,
    cli_level: Option<&'a str>,
    verbose: bool,
) -> &'a str {
    match (cli_level, verbose) {
        (Some(level), _) => level,
        (None, true) => "debug",
        (None, false) => &config.log_level,
    }
}

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros are used.
///
/// # Formats
///
/// * `"json"` - Machine-parseable JSON lines
/// * `"pretty"` - Human-readable output
pub fn init_tracing(config: &GeneralConfig, level: &str) -> Result<(), CliError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    CliError::Internal(format!("failed to initialize JSON tracing subscriber: {e}"))
                })?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    CliError::Internal(format!(
                        "failed to initialize pretty tracing subscriber: {e}"
                    ))
                })?;
        }
        _ => {
            return Err(CliError::Config(format!(
                "unknown log format '{}', expected 'json' or 'pretty'",
                config.log_format
            )));
        }
    }

    Ok(())
}
