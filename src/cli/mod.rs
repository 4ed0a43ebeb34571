//! CLI command implementations

pub mod add;
pub mod calendar;
pub mod definition;
pub mod open;
pub mod save;
pub mod task;
pub mod today;

pub use definition::{Cli, Commands, GlobalArgs};

use anyhow::{anyhow, bail, Context as _, Result};
use std::path::PathBuf;
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{self, AppState, Config, SaveOutcome};

/// Config and loaded state shared by the task commands
pub struct Context {
    pub config: Config,
    pub state: AppState,
}

impl Context {
    /// Load config, calendar and the task file picked by `global`
    pub async fn load(global: &GlobalArgs) -> Result<Self> {
        let config = Config::load()?;
        let calendar = app::load_calendar(&config)?;
        let mut state = AppState::new(calendar, global.date_or_today());

        let path = config.resolve_tasks_file(global.file.as_deref())?;
        state
            .open_or_create(&path)
            .await
            .with_context(|| format!("Failed to load tasks from {}", path.display()))?;

        Ok(Self { config, state })
    }

    /// Save and report where the text went
    pub async fn save(&mut self) -> Result<PathBuf> {
        let fallback_dir = self.config.fallback_dir()?;
        report_save(self.state.save(&fallback_dir).await)
    }
}

/// Turn a save outcome into the written path, warning on stderr when a
/// fallback copy was used. If nothing could be written the text goes to
/// stdout before the error is returned.
pub fn report_save(outcome: SaveOutcome) -> Result<PathBuf> {
    match outcome {
        SaveOutcome::Saved(path) => {
            debug!("Saved {}", path.display());
            Ok(path)
        }
        SaveOutcome::Fallback { reason, path } => {
            eprintln!("Warning: {}", reason);
            eprintln!("Saved a copy to {}", path.display());
            Ok(path)
        }
        SaveOutcome::Unsaved {
            reason,
            fallback,
            content,
        } => {
            print!("{}", content);
            if let Some(fallback) = fallback {
                eprintln!("Fallback copy failed: {}", fallback);
            }
            bail!("Could not save tasks: {}", reason)
        }
    }
}

/// Convert a 1-based position from the command line to a list index
pub fn to_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Task positions start at 1"))
}

/// Truncate to a display width, so wide characters do not overflow columns
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let (budget, ellipsis) = if max <= 3 { (max, "") } else { (max - 3, "...") };

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ellipsis);
    out
}

/// Pad with spaces to a display width
pub fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}
