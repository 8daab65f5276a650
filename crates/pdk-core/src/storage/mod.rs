mod config;

pub use config::{AnalyticsConfig, Config, PdkConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/pdk[-dev]/` based on PDK_ENV, or PDK_CONFIG_DIR when set.
///
/// Set PDK_ENV=dev to use a development config directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("PDK_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("PDK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pdk-dev")
            } else {
                base_dir.join("pdk")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
