// Configuration loading (config/draft-slots.toml), with defaults when the file is absent.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config/draft-slots.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    pub season: SeasonConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub groups_csv: PathBuf,
    pub announcement: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// Only slots from this season are candidates when set
    pub year: Option<i32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: "admin123".to_string(), // Default password, change this!
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            groups_csv: PathBuf::from("draft_groups.csv"),
            announcement: PathBuf::from("draft_announcement.txt"),
        }
    }
}

/// Parses and validates config text
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Loads the config file if it exists, otherwise the defaults.
/// `ADMIN_PASSWORD` in the environment overrides the file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    let mut config = if path.exists() {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        parse_config(&text, path)?
    } else {
        Config::default()
    };

    if let Ok(password) = std::env::var("ADMIN_PASSWORD") {
        config.admin.password = password;
    }
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.admin.password.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "admin.password".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if config.server.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "server.host".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}
