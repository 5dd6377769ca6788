//! # Client Configuration
//!
//! Connection settings shared by the analysis services.
//! Supports environment variables, config files, and programmatic overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::system;
use crate::error::{AnalystError, AnalystResult};

/// Credential appended to every request as a query parameter
///
/// Replaces a process-wide credential: each service receives its own copy at
/// construction time.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub name: String,
    pub value: String,
}

impl Credential {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Configuration for an analysis service
///
/// # Examples
///
/// ```rust
/// use gis_analyst::config::AnalystClientConfig;
///
/// let config = AnalystClientConfig::default();
/// assert_eq!(config.timeout_seconds, -1);
/// assert_eq!(config.max_concurrent_requests, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalystClientConfig {
    /// Spatial analyst service root, e.g. `http://host:8090/iserver/services/spatialanalyst-sample/restjsr/spatialanalyst`
    pub base_url: String,
    /// Request timeout in seconds: negative uses the default, zero disables it
    pub timeout_seconds: i64,
    /// Number of requests a service runs in parallel
    pub max_concurrent_requests: usize,
    pub credential: Option<Credential>,
    pub user_agent: Option<String>,
}

impl Default for AnalystClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: system::TIMEOUT_SENTINEL,
            max_concurrent_requests: system::DEFAULT_MAX_CONCURRENT_REQUESTS,
            credential: None,
            user_agent: None,
        }
    }
}

impl AnalystClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn timeout_seconds(mut self, seconds: i64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max;
        self
    }

    /// Load configuration from environment variables and config file
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file (`./gis-analyst.toml`, `./config/gis-analyst.toml`, `~/.gis-analyst/config.toml`)
    /// 3. Default values
    pub fn load() -> AnalystResult<Self> {
        let mut config = Self::default();

        if let Some(config_path) = Self::find_config_file() {
            debug!("Loading config from: {}", config_path.display());
            match Self::load_from_file(&config_path) {
                Ok(file_config) => config = file_config,
                Err(e) => {
                    debug!("Failed to load config file: {}", e);
                }
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        debug!("Loaded analyst client configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> AnalystResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalystError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            AnalystError::config_error(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> AnalystResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AnalystError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            AnalystError::config_error(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            AnalystError::config_error(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    pub fn validate(&self) -> AnalystResult<()> {
        if self.max_concurrent_requests == 0 {
            return Err(AnalystError::config_error(
                "max_concurrent_requests must be at least 1",
            ));
        }
        if let Some(credential) = &self.credential {
            if credential.name.trim().is_empty() {
                return Err(AnalystError::config_error("credential name must not be empty"));
            }
        }
        Ok(())
    }

    fn find_config_file() -> Option<PathBuf> {
        let mut possible_paths = vec![
            PathBuf::from("./gis-analyst.toml"),
            PathBuf::from("./config/gis-analyst.toml"),
        ];
        if let Some(home) = dirs::home_dir() {
            possible_paths.push(home.join(".gis-analyst").join("config.toml"));
        }

        possible_paths
            .into_iter()
            .find(|path| path.exists() && path.is_file())
    }

    fn apply_env_overrides(&mut self) -> AnalystResult<()> {
        if let Ok(url) = std::env::var("GIS_ANALYST_URL") {
            self.base_url = url;
        }
        if let Ok(timeout) = std::env::var("GIS_ANALYST_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.parse().map_err(|e| {
                AnalystError::config_error(format!("Invalid GIS_ANALYST_TIMEOUT_SECONDS: {e}"))
            })?;
        }
        if let Ok(max) = std::env::var("GIS_ANALYST_MAX_CONCURRENT") {
            self.max_concurrent_requests = max.parse().map_err(|e| {
                AnalystError::config_error(format!("Invalid GIS_ANALYST_MAX_CONCURRENT: {e}"))
            })?;
        }
        if let (Ok(name), Ok(value)) = (
            std::env::var("GIS_ANALYST_CREDENTIAL_NAME"),
            std::env::var("GIS_ANALYST_CREDENTIAL_VALUE"),
        ) {
            self.credential = Some(Credential::new(name, value));
        }
        Ok(())
    }
}
