//! Application configuration with layered loading.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: `Default` implementations below
//! 2. **Config file**: TOML file named by the `TIPS_CONFIG` env var (default
//!    `config/config.toml`, optional)
//! 3. **Environment variables**: `TIPS__SECTION__FIELD`, e.g. `TIPS__API__BASE_URL`
//!
//! # Example
//!
//! ```toml
//! environment = "production"
//!
//! [api]
//! base_url = "https://algorithmtips.org/api/"
//! request_timeout_seconds = 10
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use crate::client::HttpClientConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Connection settings for the leads API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto. A trailing `/` is added if missing.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds. Defaults to `30`.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// TCP connect timeout in seconds. Defaults to `5`.
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Maximum number of requests in flight at once. Defaults to `64`.
    #[serde(default = "default_concurrent_limit")]
    pub concurrent_limit: usize,

    /// How long a request may wait for a concurrency slot. Defaults to `500`.
    #[serde(default = "default_permit_timeout_ms")]
    pub permit_timeout_ms: u64,

    /// Overrides the `User-Agent` header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

fn default_concurrent_limit() -> usize {
    64
}

fn default_permit_timeout_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            concurrent_limit: default_concurrent_limit(),
            permit_timeout_ms: default_permit_timeout_ms(),
            user_agent: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format() }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads defaults, then `config_path` if it exists, then `TIPS__*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or a value has the wrong type.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_builder = Config::builder()
            .set_default("environment", default_environment())?
            .set_default("api.base_url", default_base_url())?
            .set_default("api.request_timeout_seconds", default_request_timeout_seconds())?
            .set_default("api.connect_timeout_seconds", default_connect_timeout_seconds())?
            .set_default("api.concurrent_limit", default_concurrent_limit() as u64)?
            .set_default("api.permit_timeout_ms", default_permit_timeout_ms())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("TIPS").separator("__"))
            .build()?;

        let mut config: Self = config_builder.try_deserialize()?;
        config.normalize();
        Ok(config)
    }

    /// Loads from the file named by `TIPS_CONFIG`, or `config/config.toml`.
    ///
    /// # Errors
    ///
    /// See [`from_file`](Self::from_file).
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("TIPS_CONFIG").unwrap_or_else(|_| "config/config.toml".to_string());
        Self::from_file(&config_path)
    }

    fn normalize(&mut self) {
        if !self.api.base_url.is_empty() && !self.api.base_url.ends_with('/') {
            self.api.base_url.push('/');
        }
    }

    /// Checks values that deserialize fine but cannot work at runtime.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.is_empty() {
            return Err("API base URL is empty".to_string());
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(format!("Invalid API base URL: {}", self.api.base_url));
        }

        if self.api.request_timeout_seconds == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if self.api.connect_timeout_seconds == 0 {
            return Err("Connect timeout must be greater than 0".to_string());
        }

        if self.api.concurrent_limit == 0 {
            return Err("Concurrent request limit must be greater than 0".to_string());
        }

        if self.api.permit_timeout_ms == 0 {
            return Err("Permit timeout must be greater than 0".to_string());
        }

        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err("Logging format must be 'json' or 'pretty'".to_string());
        }

        Ok(())
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_seconds)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.api.connect_timeout_seconds)
    }

    /// HTTP client settings derived from the `[api]` section.
    #[must_use]
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut http = HttpClientConfig {
            concurrent_limit: self.api.concurrent_limit,
            permit_timeout_ms: self.api.permit_timeout_ms,
            request_timeout: self.request_timeout(),
            connect_timeout: self.connect_timeout(),
            ..HttpClientConfig::default()
        };
        if let Some(user_agent) = &self.api.user_agent {
            http.user_agent.clone_from(user_agent);
        }
        http
    }
}
