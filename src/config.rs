use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::recognizer::DEFAULT_SONGREC;

/// Log filter used when nothing else asks for one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Defaults that can be kept in a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// songrec binary to run
    pub songrec: Option<String>,

    /// Log filter for stderr, e.g. "info" or "songid=debug"
    pub log_level: Option<String>,
}

impl Config {
    /// Create a new empty config
    pub fn new() -> Self {
        Config {
            songrec: None,
            log_level: None,
        }
    }

    /// Built-in values, used below anything from a file or the command line
    pub fn builtin() -> Self {
        Config {
            songrec: Some(DEFAULT_SONGREC.to_string()),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Get the config file path (~/.state/songid/defaults.toml)
    pub fn get_config_path() -> Result<PathBuf, io::Error> {
        let home = std::env::var("HOME")
            .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "HOME environment variable not set"))?;

        let config_dir = Path::new(&home).join(".state").join("songid");
        Ok(config_dir.join("defaults.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from a file. A missing file yields an empty config.
    pub fn load_from(config_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !config_path.exists() {
            return Ok(Config::new());
        }

        let content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merge this config with another, preferring values from other
    pub fn merge(&mut self, other: &Config) {
        if other.songrec.is_some() {
            self.songrec = other.songrec.clone();
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level.clone();
        }
    }

    pub fn songrec(&self) -> &str {
        self.songrec.as_deref().unwrap_or(DEFAULT_SONGREC)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
