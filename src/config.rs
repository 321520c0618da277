use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const KEYS: [&str; 2] = ["history_limit", "interface"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interface {
    #[default]
    Menu,
    Tui,
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interface::Menu => write!(f, "menu"),
            Interface::Tui => write!(f, "tui"),
        }
    }
}

impl FromStr for Interface {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(Interface::Menu),
            "tui" => Ok(Interface::Tui),
            _ => Err(ConfigError::InvalidValue {
                key: "interface".to_string(),
                value: s.to_string(),
                expected: "'menu' or 'tui'",
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of undoable steps; 0 keeps everything.
    #[serde(default)]
    pub history_limit: usize,
    #[serde(default)]
    pub interface: Interface,
}

impl Config {
    /// A missing config file is not an error; defaults are used instead.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&get_config_file_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&get_config_file_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = toml::to_string(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    pub fn history_limit(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.history_limit)
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "history_limit" => Ok(self.history_limit.to_string()),
            "interface" => Ok(self.interface.to_string()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "history_limit" => {
                self.history_limit = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    expected: "a non-negative integer",
                })?;
            }
            "interface" => self.interface = value.parse()?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

pub fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?;

    Ok(config_dir.join("todo-undo").join("config.toml"))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find config directory")]
    ConfigDirNotFound,
    #[error("Unknown configuration key '{0}'. Supported keys: history_limit, interface.")]
    UnknownKey(String),
    #[error("Invalid value '{value}' for '{key}': expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Failed to parse config file: {0}")]
    ParseError(String),
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("todo-undo-test-{}-{}", name, std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_config_path("missing");
        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.history_limit(), None);
        assert_eq!(config.interface, Interface::Menu);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_config_path("roundtrip");
        let mut config = Config::default();
        config.set("history_limit", "20").unwrap();
        config.set("interface", "tui").unwrap();

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.history_limit(), NonZeroUsize::new(20));
        assert_eq!(loaded.interface, Interface::Tui);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_config_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "interface = \"tui\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.history_limit, 0);
        assert_eq!(config.interface, Interface::Tui);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_malformed_file() {
        let path = temp_config_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "history_limit = \"lots\"\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_get_and_set_validation() {
        let mut config = Config::default();

        assert_eq!(config.get("interface").unwrap(), "menu");
        assert_eq!(config.get("history_limit").unwrap(), "0");
        assert!(matches!(config.get("file_path"), Err(ConfigError::UnknownKey(_))));

        assert!(matches!(
            config.set("history_limit", "-3"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("interface", "gui"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(config, Config::default());
    }
}
