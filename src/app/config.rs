//! User configuration management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::get_app_dir;

const DEFAULT_TASKS_FILE: &str = "tasks.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub app_state: AppStateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Exception calendar CSV; relative paths resolve against the app dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default = "default_date_column")]
    pub date_column: String,

    #[serde(default = "default_flag_column")]
    pub flag_column: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            path: None,
            date_column: default_date_column(),
            flag_column: default_flag_column(),
        }
    }
}

fn default_date_column() -> String {
    "日付".to_string()
}

fn default_flag_column() -> String {
    "稼働日".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_file: Option<String>,

    /// Where a copy is written when saving to the task file fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppStateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_file: Option<String>,
}

fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(load_config()?.unwrap_or_default())
    }

    /// Calendar file to load, if one is configured
    pub fn calendar_path(&self) -> Result<Option<PathBuf>> {
        match &self.calendar.path {
            Some(p) => Ok(Some(resolve_in_app_dir(p)?)),
            None => Ok(None),
        }
    }

    /// Pick the task file: explicit flag, last opened file, configured
    /// default, then `tasks.yaml` in the app dir.
    pub fn resolve_tasks_file(&self, flag: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path.to_path_buf());
        }
        if let Some(p) = &self.app_state.last_opened_file {
            return Ok(expand_home(p));
        }
        if let Some(p) = &self.storage.tasks_file {
            return resolve_in_app_dir(p);
        }
        Ok(get_app_dir()?.join(DEFAULT_TASKS_FILE))
    }

    pub fn fallback_dir(&self) -> Result<PathBuf> {
        if let Some(p) = &self.storage.fallback_dir {
            return Ok(expand_home(p));
        }
        match dirs::download_dir() {
            Some(dir) => Ok(dir),
            None => get_app_dir(),
        }
    }
}

pub fn load_config() -> Result<Option<Config>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(Some(config))
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}

/// Remember the file the user opened so later commands default to it
pub fn remember_last_opened(path: &Path) -> Result<()> {
    let mut config = Config::load()?;
    config.app_state.last_opened_file = Some(path.display().to_string());
    save_config(&config)
}

fn expand_home(s: &str) -> PathBuf {
    if let Some(stripped) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(s)
}

fn resolve_in_app_dir(s: &str) -> Result<PathBuf> {
    let path = expand_home(s);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(get_app_dir()?.join(path))
    }
}
