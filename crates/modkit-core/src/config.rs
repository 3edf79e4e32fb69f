//! Configuration loading and typed config structures for the modkit host.
//!
//! The canonical configuration lives in `modkit-config.yaml` at the project
//! root. Every field has a default, so an empty file (or no file at all) is
//! a valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level host configuration.
///
/// Mirrors the structure of `modkit-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModkitConfig {
    /// Tick loop and session settings.
    #[serde(default)]
    pub host: HostConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Built-in subscriber toggles.
    #[serde(default)]
    pub events: EventsConfig,
}

impl ModkitConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `MODKIT_LOG_LEVEL` overrides `logging.level`
    /// - `MODKIT_SESSION` overrides `host.session_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse configuration from a YAML string without consulting the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from a variable lookup (normally the process
    /// environment).
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("MODKIT_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("MODKIT_SESSION") {
            self.host.session_path = PathBuf::from(val);
        }
    }
}

/// Tick loop and session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// Name used as the monitor source label.
    #[serde(default = "default_host_name")]
    pub name: String,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks (0 = run until the session ends).
    #[serde(default)]
    pub max_ticks: u64,

    /// Session script replayed by the host.
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            name: default_host_name(),
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
            session_path: default_session_path(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Built-in subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventsConfig {
    /// Register subscribers that log every player event.
    #[serde(default = "default_true")]
    pub log_subscribers: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            log_subscribers: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_host_name() -> String {
    "modkit".to_owned()
}

const fn default_tick_interval_ms() -> u64 {
    250
}

fn default_session_path() -> PathBuf {
    PathBuf::from("sessions/demo.yaml")
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ModkitConfig::default();
        assert_eq!(config.host.name, "modkit");
        assert_eq!(config.host.tick_interval_ms, 250);
        assert_eq!(config.host.max_ticks, 0);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.events.log_subscribers);
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = ModkitConfig::parse_without_env("  \n").ok();
        assert_eq!(config, Some(ModkitConfig::default()));
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
host:
  name: "test-host"
  tick_interval_ms: 10
  max_ticks: 5
  session_path: "sessions/other.yaml"

logging:
  level: "debug"
  format: json

events:
  log_subscribers: false
"#;
        let config = ModkitConfig::parse_without_env(yaml).unwrap_or_default();
        assert_eq!(config.host.name, "test-host");
        assert_eq!(config.host.tick_interval_ms, 10);
        assert_eq!(config.host.max_ticks, 5);
        assert_eq!(config.host.session_path, PathBuf::from("sessions/other.yaml"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.events.log_subscribers);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = ModkitConfig::parse_without_env("host:\n  max_ticks: 3\n").ok();
        assert_eq!(config.as_ref().map(|c| c.host.max_ticks), Some(3));
        assert_eq!(config.as_ref().map(|c| c.host.tick_interval_ms), Some(250));
        assert_eq!(config.map(|c| c.logging.level), Some(String::from("info")));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = ModkitConfig::default();
        config.apply_env_overrides(|key| match key {
            "MODKIT_LOG_LEVEL" => Some(String::from("trace")),
            "MODKIT_SESSION" => Some(String::from("/tmp/session.yaml")),
            _ => None,
        });
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.host.session_path, PathBuf::from("/tmp/session.yaml"));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = ModkitConfig::parse_without_env("host: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = ModkitConfig::from_file(Path::new("/definitely/not/here.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
