//! Task file storage
//!
//! The only place task data touches the filesystem. Saves keep a `.bak` of
//! the previous file; if the save itself fails a copy is written to the
//! fallback directory so the text is not lost.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Task file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Result of a save that may have fallen back to a copy
#[derive(Debug)]
pub enum SaveOutcome {
    /// Written to the task file
    Saved(PathBuf),
    /// Task file write failed; the copy at `path` holds the text
    Fallback { reason: StorageError, path: PathBuf },
    /// Nothing could be written; the text is handed back to the caller
    Unsaved {
        reason: StorageError,
        fallback: Option<StorageError>,
        content: String,
    },
}

pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the file, `None` if it does not exist yet
    pub async fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                info!("Loaded task file {}", self.path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Read a file that must already exist
    pub async fn load_existing(&self) -> Result<String> {
        self.load()
            .await?
            .ok_or_else(|| StorageError::NotFound(self.path.clone()))
    }

    pub async fn save(&self, content: &str) -> Result<()> {
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            let backup_path = backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                warn!("Failed to create backup: {}", e);
            }
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Write {
                    path: self.path.clone(),
                    source,
                })?;
        }

        fs::write(&self.path, content)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        info!("Saved task file {}", self.path.display());
        Ok(())
    }

    /// Save, writing a dated copy into `fallback_dir` if the task file
    /// cannot be written.
    pub async fn save_with_fallback(
        &self,
        content: &str,
        fallback_dir: &Path,
        date: NaiveDate,
    ) -> SaveOutcome {
        let reason = match self.save(content).await {
            Ok(()) => return SaveOutcome::Saved(self.path.clone()),
            Err(e) => e,
        };
        warn!("{}; writing fallback copy", reason);

        match write_fallback(fallback_dir, date, content).await {
            Ok(path) => SaveOutcome::Fallback { reason, path },
            Err(fallback) => SaveOutcome::Unsaved {
                reason,
                fallback: Some(fallback),
                content: content.to_string(),
            },
        }
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// File name used for fallback copies, e.g. `tasks_2024-06-03.yaml`
pub fn fallback_file_name(date: NaiveDate) -> String {
    format!("tasks_{}.yaml", date.format("%Y-%m-%d"))
}

pub async fn write_fallback(dir: &Path, date: NaiveDate, content: &str) -> Result<PathBuf> {
    let path = dir.join(fallback_file_name(date));
    let write_err = |source| StorageError::Write {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).await.map_err(write_err)?;
    fs::write(&path, content).await.map_err(write_err)?;
    info!("Wrote fallback copy {}", path.display());
    Ok(path)
}
