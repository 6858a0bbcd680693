//! Configuration System
//!
//! Handles loading client configuration from TOML files and environment
//! variables. Every field has a default, so an empty file is valid.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Extra attempts for idempotent GETs after a transport failure
    #[serde(default)]
    pub max_retries: u32,

    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

/// Address of the hosted tracker API
pub const DEFAULT_API_BASE: &str = "https://dsa-tracker-e5lk.onrender.com";

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_retry_backoff() -> u64 {
    500
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff(),
        }
    }
}

impl ApiConfig {
    /// Base URL with any trailing slash removed
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Per-request timeout; `0` disables it
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Delay before retry number `attempt` (1-based): backoff * attempt²
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = u64::from(attempt).pow(2);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }
}

/// Toast notification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,
}

fn default_display_ms() -> u64 {
    3000
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
        }
    }
}

impl NotificationConfig {
    pub fn display_time(&self) -> Duration {
        Duration::from_millis(self.display_ms)
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

impl ClientConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = ClientConfig::default();
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
    pub fn load_default() -> Self {
        for path in default_config_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DSA_TRACKER_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(secs) = std::env::var("DSA_TRACKER_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.api.request_timeout_secs = s;
            }
        }
        if let Ok(retries) = std::env::var("DSA_TRACKER_MAX_RETRIES") {
            if let Ok(r) = retries.parse() {
                self.api.max_retries = r;
            }
        }

        if let Ok(level) = std::env::var("DSA_TRACKER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DSA_TRACKER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    #[cfg(feature = "native")]
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("dsa-tracker").join("config.toml"));
    }
    paths.push(PathBuf::from("./config.toml"));
    paths
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
    r#"# DSA Tracker Client Configuration
#
# Environment variables override these settings:
# - DSA_TRACKER_API_URL
# - DSA_TRACKER_TIMEOUT_SECS
# - DSA_TRACKER_MAX_RETRIES
# - DSA_TRACKER_LOG_LEVEL
# - DSA_TRACKER_LOG_FORMAT

[api]
# Tracker API address
base_url = "https://dsa-tracker-e5lk.onrender.com"

# Per-request timeout in seconds (0 = no timeout)
request_timeout_secs = 30

# Extra attempts for GET requests after a network failure (0 = single attempt)
max_retries = 0

# Base backoff between retries (ms), multiplied by attempt squared
retry_backoff_ms = 500

[notifications]
# How long a toast stays on screen (ms)
display_ms = 3000

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
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base(), DEFAULT_API_BASE);
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.api.max_retries, 0);
        assert_eq!(config.notifications.display_time(), Duration::from_millis(3000));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.notifications.display_ms, 3000);
    }

    #[test]
    fn test_generated_config_parses() {
        let config = ClientConfig::from_toml_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.api.retry_backoff_ms, 500);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_base_trims_trailing_slash() {
        let config = ClientConfig::from_toml_str(
            r#"
            [api]
            base_url = "http://localhost:5000/"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base(), "http://localhost:5000");
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = ClientConfig::from_toml_str("[api]\nrequest_timeout_secs = 0").unwrap();
        assert_eq!(config.api.request_timeout(), None);

        let config = ClientConfig::from_toml_str("[api]\nrequest_timeout_secs = 1").unwrap();
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_retry_delay_grows_quadratically() {
        let api = ApiConfig {
            retry_backoff_ms: 100,
            ..ApiConfig::default()
        };
        assert_eq!(api.retry_delay(1), Duration::from_millis(100));
        assert_eq!(api.retry_delay(2), Duration::from_millis(400));
        assert_eq!(api.retry_delay(3), Duration::from_millis(900));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://127.0.0.1:9000\"\nmax_retries = 2\n\n[notifications]\ndisplay_ms = 1500"
        )
        .unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.max_retries, 2);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.notifications.display_ms, 1500);
    }

    #[test]
    fn test_load_errors() {
        let missing = Path::new("/definitely/not/here/config.toml");
        assert!(matches!(ClientConfig::load(missing), Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();
        assert!(matches!(
            ClientConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
