//! `tasklog open` command implementation

use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;

use super::GlobalArgs;
use crate::app::{self, remember_last_opened, AppState, Config};

#[derive(Args)]
pub struct OpenArgs {
    /// Task file to open
    pub path: PathBuf,
}

pub async fn run(global: &GlobalArgs, args: OpenArgs) -> Result<()> {
    let config = Config::load()?;
    let calendar = app::load_calendar(&config)?;
    let mut state = AppState::new(calendar, global.date_or_today());

    state
        .open(&args.path)
        .await
        .with_context(|| format!("Failed to open {}", args.path.display()))?;

    let path = args.path.canonicalize()?;
    remember_last_opened(&path)?;

    println!(
        "Opened {} ({} dates, {} tasks on {})",
        path.display(),
        state.store().len(),
        state.tasks().len(),
        state.current_date()
    );
    Ok(())
}
