//! File System Utilities
//!
//! Configuration directory management.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::constants::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, CONFIG_FILE_NAME};
use crate::error::{Error, Result};

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/solar-dashboard/` or `$XDG_CONFIG_HOME/solar-dashboard/`
/// - **macOS**: `~/Library/Application Support/org.solar-dashboard.solar-dashboard/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\solar-dashboard\solar-dashboard\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let Some(project_dirs) = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME) else {
        return Err(Error::Invalid {
            message: "Could not determine project directories".to_string(),
        });
    };

    let config_dir = project_dirs.config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Default location of the configuration file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
}
