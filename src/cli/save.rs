//! `tasklog save` and `tasklog export` command implementations

use anyhow::Result;

use super::{Context, GlobalArgs};

pub async fn run_save(global: &GlobalArgs) -> Result<()> {
    let mut ctx = Context::load(global).await?;
    let path = ctx.save().await?;
    println!("Saved {}", path.display());
    Ok(())
}

/// Print the saved form without touching the file
pub async fn run_export(global: &GlobalArgs) -> Result<()> {
    let mut ctx = Context::load(global).await?;
    print!("{}", ctx.state.prepare_save());
    Ok(())
}
