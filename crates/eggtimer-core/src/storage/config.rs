//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - The preset a new countdown starts on
//! - Which completion alerts are enabled
//!
//! Configuration is stored at `~/.config/eggtimer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::data_dir;
use crate::error::ConfigError;
use crate::preset::{self, Preset};

/// Timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Catalog id of the preset selected at startup.
    #[serde(default = "default_preset_id")]
    pub default_preset: String,
}

/// Completion alert toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub notifications: bool,
    /// Hold a keep-awake lock while the countdown runs.
    #[serde(default = "default_true")]
    pub keep_awake: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/eggtimer/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
}

fn default_preset_id() -> String {
    preset::default_preset().id.to_string()
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_preset: default_preset_id(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            sound: true,
            notifications: true,
            keep_awake: true,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => serde_json::Value::Number(
                    value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                        .into(),
                ),
                serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                // Whole sections are not assignable.
                _ => return Err(unknown()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %e, "using default config");
            Self::default()
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        if key == "timer.default_preset" && preset::find(value).is_none() {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("no preset with id '{value}'"),
            });
        }

        *self = updated;
        Ok(())
    }

    /// The configured startup preset, falling back to the catalog default
    /// when the stored id no longer exists.
    pub fn default_preset(&self) -> &'static Preset {
        preset::find(&self.timer.default_preset).unwrap_or_else(|| {
            warn!(
                id = %self.timer.default_preset,
                "configured preset not found; using catalog default"
            );
            preset::default_preset()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.default_preset, "creamy-4");
        assert!(parsed.alerts.keep_awake);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[alerts]\nsound = false\n").unwrap();
        assert!(!parsed.alerts.sound);
        assert!(parsed.alerts.notifications);
        assert_eq!(parsed.default_preset().id, "creamy-4");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("alerts.sound").as_deref(), Some("true"));
        assert_eq!(cfg.get("timer.default_preset").as_deref(), Some("creamy-4"));
        assert!(cfg.get("alerts.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_bool() {
        let mut cfg = Config::default();
        cfg.set("alerts.notifications", "false").unwrap();
        assert!(!cfg.alerts.notifications);
    }

    #[test]
    fn vibration_is_not_a_config_key() {
        let mut cfg = Config::default();
        assert!(cfg.get("alerts.vibration").is_none());
        assert!(matches!(
            cfg.set("alerts.vibration", "true"),
            Err(ConfigError::UnknownKey(_))
        ));
        // Files written before the key was removed still load.
        let parsed: Config = toml::from_str("[alerts]\nvibration = true\n").unwrap();
        assert!(parsed.alerts.sound);
    }

    #[test]
    fn set_rejects_invalid_bool() {
        let mut cfg = Config::default();
        let err = cfg.set("alerts.sound", "loud").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(cfg.alerts.sound);
    }

    #[test]
    fn set_rejects_unknown_key_and_sections() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("alerts.smell", "true"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("alerts", "true"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_default_preset_validates_catalog_id() {
        let mut cfg = Config::default();
        cfg.set("timer.default_preset", "hard-8").unwrap();
        assert_eq!(cfg.default_preset().duration_min, 8);

        assert!(cfg.set("timer.default_preset", "raw-0").is_err());
        assert_eq!(cfg.timer.default_preset, "hard-8");
    }

    #[test]
    fn stale_default_preset_falls_back() {
        let mut cfg = Config::default();
        cfg.timer.default_preset = "removed-12".into();
        assert_eq!(cfg.default_preset().id, "creamy-4");
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.timer.default_preset, "creamy-4");
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set("alerts.keep_awake", "false").unwrap();
        cfg.set("timer.default_preset", "soft-2").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.alerts.keep_awake);
        assert_eq!(loaded.default_preset().id, "soft-2");
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = [[[").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
