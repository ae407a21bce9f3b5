//! Application configuration file support.
//!
//! Settings are read from an optional TOML file and then overridden by
//! environment variables:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [schedule]
//! appointment_count = 30
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::scheduler::{ScheduleConfig, DEFAULT_APPOINTMENT_COUNT};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "APPOINTMENTS_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Scheduler policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default = "default_appointment_count")]
    pub appointment_count: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_appointment_count() -> u32 {
    DEFAULT_APPOINTMENT_COUNT
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            appointment_count: default_appointment_count(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `appointments.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns the defaults when no file exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("appointments.toml"),
            PathBuf::from("backend/appointments.toml"),
            PathBuf::from("../appointments.toml"),
        ];

        match search_paths.iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load the file named by `APPOINTMENTS_CONFIG` (or the default location)
    /// and apply environment overrides.
    ///
    /// # Environment Variables
    /// - `APPOINTMENTS_CONFIG` (optional): path to the TOML file
    /// - `HOST` (optional): listener host
    /// - `PORT` (optional): listener port
    /// - `APPOINTMENT_COUNT` (optional): appointments per schedule
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?,
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT` and `APPOINTMENT_COUNT` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a valid port number, got '{}'", port)))?;
        }
        if let Some(count) = lookup("APPOINTMENT_COUNT") {
            self.schedule.appointment_count = count.parse().map_err(|_| {
                ConfigError::Invalid(format!("APPOINTMENT_COUNT must be a whole number, got '{}'", count))
            })?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schedule.appointment_count == 0 {
            return Err(ConfigError::Invalid(
                "schedule.appointment_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Listener address as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn schedule_config(&self) -> ScheduleConfig {
        ScheduleConfig {
            appointment_count: self.schedule.appointment_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.schedule_config(), ScheduleConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.schedule.appointment_count, 30);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[schedule]\nappointment_count = 12").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.schedule.appointment_count, 12);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = AppConfig::from_file("/nonexistent/appointments.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = AppConfig::from_toml_str("[schedule]\nappointment_count = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = AppConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> =
            [("HOST", "127.0.0.1"), ("PORT", "3000"), ("APPOINTMENT_COUNT", "10")].into();
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.schedule.appointment_count, 10);
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|key| (key == "PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
