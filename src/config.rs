//! Configuration module for imgshelf.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, ShelfError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Image storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage root directory. Every relative path is resolved against it.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Maximum upload request size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_root() -> String {
    "user_uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    20
}

impl StorageConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/imgshelf.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Web UI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Allowed CORS origins (empty = allow any origin).
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether to serve the browser UI.
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
    /// Path to static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
    /// `max-age` sent with served images, in seconds.
    #[serde(default = "default_image_cache_max_age")]
    pub image_cache_max_age_secs: u64,
}

fn default_serve_static() -> bool {
    true
}

fn default_static_path() -> String {
    "static".to_string()
}

fn default_image_cache_max_age() -> u64 {
    3600
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec![],
            serve_static: default_serve_static(),
            static_path: default_static_path(),
            image_cache_max_age_secs: default_image_cache_max_age(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web UI configuration.
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ShelfError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ShelfError::Config(format!("config parse error: {e}")))
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The storage root is empty
    /// - The upload size limit is zero
    pub fn validate(&self) -> Result<()> {
        if self.storage.root.trim().is_empty() {
            return Err(ShelfError::Config("storage.root must not be empty".to_string()));
        }
        if self.storage.max_upload_size_mb == 0 {
            return Err(ShelfError::Config(
                "storage.max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
