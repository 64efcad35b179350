//! Core error types for eggtimer-core.
//!
//! The countdown itself cannot fail. Errors only arise at the edges:
//! resolving user-supplied preset ids, reading and writing the config
//! file, and talking to optional host services.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for eggtimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No catalog entry has this id
    #[error("Unknown preset: '{0}'")]
    UnknownPreset(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the config directory
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dot-path key does not name a config field
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Failure of an optional host service.
///
/// These never escape the controller: they are logged and dropped at the
/// call site.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The host has no such service (no audio device, no notification daemon...)
    #[error("{0} is not available on this host")]
    Unavailable(&'static str),

    /// The service exists but the call failed
    #[error("{capability} failed: {message}")]
    Failed {
        capability: &'static str,
        message: String,
    },
}

impl CapabilityError {
    pub fn failed(capability: &'static str, err: impl std::fmt::Display) -> Self {
        CapabilityError::Failed {
            capability,
            message: err.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_preset_message_names_the_id() {
        let err = CoreError::UnknownPreset("raw-0".into());
        assert_eq!(err.to_string(), "Unknown preset: 'raw-0'");
    }

    #[test]
    fn config_error_converts_into_core_error() {
        let err: CoreError = ConfigError::UnknownKey("alerts.smell".into()).into();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
        assert_eq!(
            err.to_string(),
            "Configuration error: Unknown config key: alerts.smell"
        );
    }

    #[test]
    fn capability_failed_keeps_source_message() {
        let err = CapabilityError::failed("notifier", "dbus connection refused");
        assert_eq!(err.to_string(), "notifier failed: dbus connection refused");
    }
}
