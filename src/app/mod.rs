//! Application state, configuration and storage

pub mod config;
pub mod state;
pub mod storage;

pub use config::{load_config, remember_last_opened, save_config, Config};
pub use state::AppState;
pub use storage::{SaveOutcome, StorageError, TaskFile};

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::calendar::{CalendarLoader, CalendarResolver};

/// App data directory, created on first use.
///
/// Linux: `$XDG_CONFIG_HOME/tasklog`; elsewhere `~/.tasklog`.
pub fn get_app_dir() -> Result<PathBuf> {
    let dir = app_dir_path()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

#[cfg(target_os = "linux")]
fn app_dir_path() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Cannot find config directory"))?;
    Ok(config_dir.join("tasklog"))
}

#[cfg(not(target_os = "linux"))]
fn app_dir_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?;
    Ok(home.join(".tasklog"))
}

/// Load the exception calendar named in the config, or an empty one
pub fn load_calendar(config: &Config) -> Result<CalendarResolver> {
    let loader = CalendarLoader::from_config(&config.calendar);
    Ok(match config.calendar_path()? {
        Some(path) => loader.load(&path),
        None => CalendarResolver::default(),
    })
}
