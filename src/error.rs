// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Payloads are kept as strings so errors stay `Clone` and can travel inside
//! Iced messages (tile fetch results, config load results).

use crate::map::mount::MountError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Mount Error: {0}")]
    Mount(#[from] MountError),

    /// Tile request or decoding failure.
    #[error("Tile Error: {0}")]
    Tile(String),

    #[error("Logging Error: {0}")]
    Logging(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Tile(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts_to_io_variant() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.toml missing");
        match Error::from(io) {
            Error::Io(message) => assert!(message.contains("settings.toml missing")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn mount_error_is_wrapped_with_display_prefix() {
        let err: Error = MountError::AlreadyBound("map".into()).into();
        assert!(err.to_string().starts_with("Mount Error:"));
        assert!(err.to_string().contains("map"));
    }

    #[test]
    fn toml_error_becomes_config_error() {
        let parse = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        assert!(matches!(Error::from(parse), Error::Config(_)));
    }
}
