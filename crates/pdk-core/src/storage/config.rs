//! TOML-based front-end configuration.
//!
//! Stores:
//! - Usage analytics settings (opt-out flag, anonymous user id, endpoint)
//! - The external PDK program to forward commands to
//!
//! Configuration is stored at `~/.config/pdk/config.toml`. Environment
//! variables (`PDK_DISABLE_ANALYTICS`, `PDK_ANALYTICS_ENDPOINT`,
//! `PDK_GA_TRACKING_ID`, `PDK_EXECUTABLE`) override the file after loading.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::analytics::FLUSH_DURATION;
use crate::error::ConfigError;

const DEFAULT_ENDPOINT: &str = "https://www.google-analytics.com/collect";

/// Usage analytics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub disabled: bool,
    /// Anonymous id sent as the GA client id. Generated on first load.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_tracking_id")]
    pub tracking_id: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// How long a command waits for its report before exiting anyway.
    #[serde(default = "default_flush_ms")]
    pub flush_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

/// External PDK program configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdkConfig {
    #[serde(default = "default_executable")]
    pub executable: String,
}

/// Front-end configuration.
///
/// Serialized to/from TOML at `~/.config/pdk/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub pdk: PdkConfig,
}

fn default_tracking_id() -> Option<String> {
    option_env!("PDK_GA_TRACKING_ID").map(String::from)
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}
fn default_flush_ms() -> u64 {
    FLUSH_DURATION.as_millis() as u64
}
fn default_request_timeout_ms() -> u64 {
    5_000
}
fn default_executable() -> String {
    "pdk".into()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            user_id: None,
            tracking_id: default_tracking_id(),
            endpoint: default_endpoint(),
            flush_ms: default_flush_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for PdkConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
        }
    }
}

impl AnalyticsConfig {
    /// Reports are only sent when not opted out and a tracking id is known.
    pub fn is_enabled(&self) -> bool {
        !self.disabled
            && self
                .tracking_id
                .as_deref()
                .is_some_and(|id| !id.trim().is_empty())
    }

    pub fn flush_deadline(&self) -> Duration {
        Duration::from_millis(self.flush_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "" | "0" | "false" | "no" | "off")
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, creating it on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory is unusable or the file exists
    /// but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path` or write defaults there when it does not exist.
    ///
    /// A missing `analytics.user_id` is generated and persisted so the
    /// anonymous id stays stable across invocations. If it cannot be written
    /// the loaded values are still returned, with the id kept in memory.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str::<Config>(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        cfg.ensure_user_id(path);
        Ok(cfg)
    }

    /// Generate `analytics.user_id` if it is missing and try to save it to
    /// `path`. A failed save only costs the id's stability.
    fn ensure_user_id(&mut self, path: &Path) {
        if self.analytics.user_id.is_some() {
            return;
        }
        self.analytics.user_id = Some(uuid::Uuid::new_v4().to_string());
        if let Err(e) = self.save_to(path) {
            tracing::warn!(error = %e, "Failed to persist analytics user id");
        }
    }

    /// Load from disk, returning defaults on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Persist to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Apply `PDK_*` environment overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides resolved through `lookup`, then validate.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PDK_DISABLE_ANALYTICS") {
            if is_truthy(&value) {
                self.analytics.disabled = true;
            }
        }
        if let Some(endpoint) = lookup("PDK_ANALYTICS_ENDPOINT") {
            self.analytics.endpoint = endpoint;
        }
        if let Some(tracking_id) = lookup("PDK_GA_TRACKING_ID") {
            self.analytics.tracking_id = Some(tracking_id);
        }
        if let Some(executable) = lookup("PDK_EXECUTABLE").filter(|v| !v.is_empty()) {
            self.pdk.executable = executable;
        }
        self.validate()
    }

    /// Check values that serde alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let endpoint = url::Url::parse(&self.analytics.endpoint)
            .map_err(|e| invalid("analytics.endpoint", e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(invalid(
                "analytics.endpoint",
                format!("unsupported scheme '{}'", endpoint.scheme()),
            ));
        }
        if self.pdk.executable.trim().is_empty() {
            return Err(invalid("pdk.executable", "must not be empty".into()));
        }
        Ok(())
    }
}
