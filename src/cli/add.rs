//! `tasklog add` command implementation

use anyhow::Result;
use clap::Args;
use tracing::debug;

use super::{Context, GlobalArgs};

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
}

pub async fn run(global: &GlobalArgs, args: AddArgs) -> Result<()> {
    let mut ctx = Context::load(global).await?;

    let Some(index) = ctx.state.add_task(args.title.trim()) else {
        debug!("Ignoring blank task title");
        return Ok(());
    };
    ctx.save().await?;

    let title = ctx.state.task(index).map(|t| t.title.as_str()).unwrap_or_default();
    println!(
        "Added #{} on {}: {}",
        index + 1,
        ctx.state.current_date(),
        title
    );
    Ok(())
}
