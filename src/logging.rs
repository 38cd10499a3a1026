// SPDX-License-Identifier: MPL-2.0
//! Global `tracing` subscriber setup.
//!
//! Console output only. `RUST_LOG` refines the filter; the level passed to
//! [`init`] (usually from `--log-level`) is the default directive.

use crate::error::{Error, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

/// Parses a level name (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub fn parse_level(raw: &str) -> Result<LevelFilter> {
    raw.trim()
        .parse::<LevelFilter>()
        .map_err(|e| Error::Logging(format!("invalid log level '{raw}': {e}")))
}

/// Installs the global subscriber.
///
/// # Errors
/// Returns [`Error::Logging`] for an unknown level name or when a global
/// subscriber is already installed.
pub fn init(level: Option<&str>) -> Result<()> {
    let level = match level {
        Some(raw) => parse_level(raw)?,
        None => DEFAULT_LEVEL,
    };
    install(level)
}

/// Like [`init`], but an unknown level name falls back to
/// [`DEFAULT_LEVEL`] and is reported as a warning through the new
/// subscriber.
///
/// # Errors
/// Returns [`Error::Logging`] when a global subscriber is already installed.
pub fn init_or_default(level: Option<&str>) -> Result<()> {
    match level.map(parse_level).transpose() {
        Ok(level) => install(level.unwrap_or(DEFAULT_LEVEL)),
        Err(err) => {
            install(DEFAULT_LEVEL)?;
            tracing::warn!(error = %err, level = %DEFAULT_LEVEL, "using default log level");
            Ok(())
        }
    }
}

fn install(level: LevelFilter) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer().compact().with_ansi(true))
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
