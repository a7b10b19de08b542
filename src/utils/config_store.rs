//! ConfigStore - Local Configuration Storage
//!
//! The configuration is kept as TOML. A missing file is not an error; the
//! defaults are used instead.

use std::fs;
use std::path::Path;

use crate::domain::config::AppConfig;
use crate::error::Result;
use crate::helpers::default_config_path;

/// Load the configuration at `path`, or the defaults if there is no file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::info!("No configuration at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    tracing::info!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// Save the configuration to `path`, creating parent directories
pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Load from `path` if given, else from the platform configuration directory
pub fn load_config_or_default(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config(path),
        None => load_config(&default_config_path()?),
    }
}
