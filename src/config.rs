// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Persisted application flags and the file-backed handler that stores them.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constant::{CONFIG_DIR, CONFIG_FILE, CONFIG_VERSION};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available on this platform")]
    NoConfigDir,

    #[error("config I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is malformed: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Config entry
// =============================================================================

/// Flags persisted across launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub version: u64,
    /// Location updates were running when the process last ran.
    pub updates_started: bool,
    /// A background session was active when the process last ran.
    pub background_activity: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            updates_started: false,
            background_activity: false,
        }
    }
}

impl AppConfig {
    /// Read the entry behind `handler`. A missing file yields the defaults.
    pub fn get_entry(handler: &ConfigHandler) -> Result<Self, ConfigError> {
        let path = handler.path();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the entry behind `handler`, creating its directory if needed.
    pub fn write_entry(&self, handler: &ConfigHandler) -> Result<(), ConfigError> {
        let path = handler.path();
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Format {
            path: path.to_path_buf(),
            source,
        })?;

        // Write-then-rename so a crash never leaves a truncated file.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, text).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)
    }
}

// =============================================================================
// Handler
// =============================================================================

/// Location of the persisted config entry.
#[derive(Debug, Clone)]
pub struct ConfigHandler {
    path: PathBuf,
}

impl ConfigHandler {
    /// Handler for the platform config directory.
    pub fn new() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::in_dir(&dir.join(CONFIG_DIR)))
    }

    /// Handler storing its entry in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(CONFIG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Shared, write-through view of the persisted flags.
///
/// Without a handler the flags only live in memory.
#[derive(Debug)]
pub struct Settings {
    handler: Option<ConfigHandler>,
    config: Mutex<AppConfig>,
}

impl Settings {
    /// Load persisted flags; unreadable entries fall back to defaults.
    pub fn load(handler: Option<ConfigHandler>) -> Self {
        let config = match handler.as_ref().map(AppConfig::get_entry) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("Failed to read config, using defaults: {e}");
                AppConfig::default()
            }
            None => AppConfig::default(),
        };
        Self {
            handler,
            config: Mutex::new(config),
        }
    }

    pub fn in_memory() -> Self {
        Self::load(None)
    }

    pub fn get(&self) -> AppConfig {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_updates_started(&self, started: bool) {
        self.modify(|config| config.updates_started = started);
    }

    pub fn set_background_activity(&self, active: bool) {
        self.modify(|config| config.background_activity = active);
    }

    /// Apply `f` and save when anything changed.
    fn modify<F: FnOnce(&mut AppConfig)>(&self, f: F) {
        let mut config = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        let before = *config;
        f(&mut config);
        if *config == before {
            return;
        }
        if let Some(ref handler) = self.handler
            && let Err(e) = config.write_entry(handler)
        {
            log::error!("Failed to save config: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("speedo-config-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let handler = ConfigHandler::in_dir(&temp_dir("missing"));
        assert_eq!(AppConfig::get_entry(&handler).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_settings_write_through() {
        let dir = temp_dir("write");
        let settings = Settings::load(Some(ConfigHandler::in_dir(&dir)));
        settings.set_updates_started(true);
        settings.set_background_activity(true);

        let reloaded = Settings::load(Some(ConfigHandler::in_dir(&dir)));
        let config = reloaded.get();
        assert!(config.updates_started);
        assert!(config.background_activity);

        reloaded.set_updates_started(false);
        let config = AppConfig::get_entry(&ConfigHandler::in_dir(&dir)).unwrap();
        assert!(!config.updates_started);
        assert!(config.background_activity);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = temp_dir("malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let handler = ConfigHandler::in_dir(&dir);
        std::fs::write(handler.path(), "{ nope").unwrap();

        assert!(matches!(
            AppConfig::get_entry(&handler),
            Err(ConfigError::Format { .. })
        ));
        assert_eq!(Settings::load(Some(handler)).get(), AppConfig::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = temp_dir("partial");
        std::fs::create_dir_all(&dir).unwrap();
        let handler = ConfigHandler::in_dir(&dir);
        std::fs::write(handler.path(), r#"{"updates_started": true}"#).unwrap();

        let config = AppConfig::get_entry(&handler).unwrap();
        assert!(config.updates_started);
        assert!(!config.background_activity);
        assert_eq!(config.version, CONFIG_VERSION);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_in_memory_settings() {
        let settings = Settings::in_memory();
        settings.set_updates_started(true);
        assert!(settings.get().updates_started);
    }
}
