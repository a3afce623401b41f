//! Configuration management.
//!
//! TOML configuration with environment variable overrides.
//!
//! # Configuration File Format
//!
//! ```toml
//! [http]
//! timeout_secs = 15
//!
//! [report]
//! output_dir = "./reports"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds (the only cancellation mechanism)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory reports are written to when no explicit path is given
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./reports")
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        let mut config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, a discovered file, or fall back to defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => match find_config_file() {
                Some(path) => Self::load(&path),
                None => {
                    let mut config = Config::default();
                    config.apply_env_overrides();
                    Ok(config)
                }
            },
        }
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Per-request HTTP timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(secs) = std::env::var("PARCEL_SCOUT_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.http.timeout_secs = secs;
            }
        }
        if let Ok(dir) = std::env::var("PARCEL_SCOUT_OUTPUT_DIR") {
            self.report.output_dir = PathBuf::from(dir);
        }
        if let Ok(level) = std::env::var("PARCEL_SCOUT_LOG") {
            self.logging.level = level;
        }
    }
}

/// Search the conventional locations for a config file
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("./parcel-scout.toml");
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("parcel-scout").join("config.toml"))
        .filter(|path| path.exists())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
