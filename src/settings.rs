//! # Settings Module
//!
//! ## Purpose
//! Persistent client configuration: where the solver lives, how much to log and
//! how many points the preview table shows.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "base_url": "http://localhost:8080",
//!   "log_level": "info",
//!   "log_file": "pde_client.log",
//!   "preview_rows": 10
//! }
//! ```
//! Missing keys take their default; a missing file means all defaults.
//!
//! ## Keys
//! | Key | Default | Checked on `set` |
//! |-----|---------|------------------|
//! | "base_url" | http://localhost:8080 | must parse as a URL |
//! | "log_level" | info | off, error, warn, info, debug, trace |
//! | "log_file" | pde_client.log | - |
//! | "preview_rows" | 10 | non-negative integer |

use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "pde_client_config.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
    #[error("Unknown setting: {0}")]
    UnknownKey(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub base_url: String,
    pub log_level: String,
    pub log_file: String,
    pub preview_rows: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
            log_file: "pde_client.log".to_string(),
            preview_rows: 10,
        }
    }
}

impl ClientSettings {
    pub const KEYS: [&'static str; 4] = ["base_url", "log_level", "log_file", "preview_rows"];

    /// Reads the settings file. A file that does not exist yields the defaults.
    pub fn load(config_file: &str) -> Result<Self, SettingsError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Like `load`, but a broken file is reported and replaced by the defaults.
    pub fn load_or_default(config_file: &str) -> Self {
        Self::load(config_file).unwrap_or_else(|e| {
            warn!("Cannot read settings from '{}': {}", config_file, e);
            Self::default()
        })
    }

    pub fn save(&self, config_file: &str) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "base_url" => Some(self.base_url.clone()),
            "log_level" => Some(self.log_level.clone()),
            "log_file" => Some(self.log_file.clone()),
            "preview_rows" => Some(self.preview_rows.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let value = value.trim();
        let invalid = || SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "base_url" => {
                Url::parse(value)?;
                self.base_url = value.to_string();
            }
            "log_level" => {
                LevelFilter::from_str(value).map_err(|_| invalid())?;
                self.log_level = value.to_lowercase();
            }
            "log_file" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.log_file = value.to_string();
            }
            "preview_rows" => {
                self.preview_rows = value.parse().map_err(|_| invalid())?;
            }
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Configured level, `Info` when the stored text is not a level name.
    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let settings = ClientSettings::load(path.to_str().unwrap()).unwrap();
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"base_url": "http://solver:9000"}"#)
            .unwrap();
        let settings = ClientSettings::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.base_url, "http://solver:9000");
        assert_eq!(settings.preview_rows, 10);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_broken_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let path = file.path().to_str().unwrap();
        assert!(matches!(
            ClientSettings::load(path),
            Err(SettingsError::Json(_))
        ));
        assert_eq!(ClientSettings::load_or_default(path), ClientSettings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let mut settings = ClientSettings::default();
        settings.set("preview_rows", "25").unwrap();
        settings.set("log_level", "DEBUG").unwrap();
        settings.save(path).unwrap();

        let reloaded = ClientSettings::load(path).unwrap();
        assert_eq!(reloaded, settings);
        assert_eq!(reloaded.log_level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_set_validates_values() {
        let mut settings = ClientSettings::default();
        assert!(matches!(
            settings.set("base_url", "no scheme here"),
            Err(SettingsError::InvalidUrl(_))
        ));
        assert!(matches!(
            settings.set("log_level", "loud"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set("preview_rows", "-1"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set("colour", "blue"),
            Err(SettingsError::UnknownKey(_))
        ));
        assert_eq!(settings, ClientSettings::default());

        settings.set("base_url", "https://pde.example.org/app").unwrap();
        assert_eq!(
            settings.get("base_url").as_deref(),
            Some("https://pde.example.org/app")
        );
        for key in ClientSettings::KEYS {
            assert!(settings.get(key).is_some());
        }
    }

    #[test]
    fn test_unknown_level_text_falls_back_to_info() {
        let settings = ClientSettings {
            log_level: "chatty".to_string(),
            ..ClientSettings::default()
        };
        assert_eq!(settings.log_level_filter(), LevelFilter::Info);
    }
}
