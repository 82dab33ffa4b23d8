//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Risk backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means requests may wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Static server for the browser dashboard bundle
#[derive(Debug, Clone, Deserialize)]
pub struct ServeConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8084
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("riskboard-ui/dist")
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dist_dir: default_dist_dir(),
        }
    }
}

impl ServeConfig {
    /// Socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Returns the config and the file it came from, if any. Logging is not
    /// initialized yet when this runs, so callers report the source.
    pub fn load_default() -> (Self, Option<PathBuf>) {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("riskboard").join("config.toml")),
            Some(PathBuf::from("/etc/riskboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => return (config, Some(path.clone())),
                    Err(e) => eprintln!("warning: {}", e),
                }
            }
        }

        (Self::from_env(), None)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = lookup("RISKBOARD_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = lookup("RISKBOARD_API_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.api.request_timeout_secs = Some(s);
            }
        }

        // Serve overrides
        if let Some(host) = lookup("RISKBOARD_SERVE_HOST") {
            self.serve.host = host;
        }
        if let Some(port) = lookup("RISKBOARD_SERVE_PORT") {
            if let Ok(p) = port.parse() {
                self.serve.port = p;
            }
        }
        if let Some(dir) = lookup("RISKBOARD_DIST_DIR") {
            self.serve.dist_dir = PathBuf::from(dir);
        }

        // Logging overrides
        if let Some(level) = lookup("RISKBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("RISKBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Riskboard Configuration
#
# Environment variables override these settings:
# - RISKBOARD_API_URL
# - RISKBOARD_API_TIMEOUT_SECS
# - RISKBOARD_SERVE_HOST
# - RISKBOARD_SERVE_PORT
# - RISKBOARD_DIST_DIR
# - RISKBOARD_LOG_LEVEL
# - RISKBOARD_LOG_FORMAT

[api]
# Origin of the risk backend
base_url = "http://127.0.0.1:8000"

# Per-request timeout in seconds (unset = wait indefinitely)
# request_timeout_secs = 30

[serve]
# Dashboard bundle server host
host = "127.0.0.1"

# Dashboard bundle server port
port = 8084

# Directory holding the built browser dashboard
dist_dir = "riskboard-ui/dist"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.request_timeout_secs, None);
        assert_eq!(config.serve.addr(), "127.0.0.1:8084");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.serve.port, 8084);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://risk.example:9000\"\nrequest_timeout_secs = 3").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://risk.example:9000");
        assert_eq!(config.api.request_timeout_secs, Some(3));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url =").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/riskboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("RISKBOARD_API_URL", "http://override:1"),
            ("RISKBOARD_SERVE_PORT", "not-a-port"),
            ("RISKBOARD_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://override:1");
        assert_eq!(config.serve.port, 8084);
        assert!(config.logging.is_json());
    }
}
