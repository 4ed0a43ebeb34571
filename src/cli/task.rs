//! Task status commands: detail, done, carry

use anyhow::{anyhow, Result};
use clap::Args;

use super::{Context, GlobalArgs};
use crate::app::AppState;
use crate::task::Task;

#[derive(Args)]
pub struct PositionArgs {
    /// Task position in the day's list (starting at 1)
    pub position: usize,
}

#[derive(Args)]
pub struct DetailArgs {
    /// Task position in the day's list (starting at 1)
    pub position: usize,

    /// Notes for the task; an empty string clears them
    pub text: String,
}

enum Action<'a> {
    Detail(&'a str),
    Done,
    Carry,
}

fn apply<'s>(state: &'s mut AppState, index: usize, action: &Action<'_>) -> Option<&'s Task> {
    match action {
        Action::Detail(text) => state.edit_detail(index, text),
        Action::Done => state.mark_done(index),
        Action::Carry => state.mark_carry(index),
    }
}

async fn run_action(global: &GlobalArgs, position: usize, action: Action<'_>) -> Result<()> {
    let index = super::to_index(position)?;
    let mut ctx = Context::load(global).await?;
    let date = ctx.state.current_date();

    let line = apply(&mut ctx.state, index, &action)
        .map(|task| format!("{} {}", task.status.marker(), task.title))
        .ok_or_else(|| anyhow!("Task not found: #{} on {}", position, date))?;
    ctx.save().await?;

    println!("{}", line);
    Ok(())
}

pub async fn run_detail(global: &GlobalArgs, args: DetailArgs) -> Result<()> {
    run_action(global, args.position, Action::Detail(&args.text)).await
}

pub async fn run_done(global: &GlobalArgs, args: PositionArgs) -> Result<()> {
    run_action(global, args.position, Action::Done).await
}

pub async fn run_carry(global: &GlobalArgs, args: PositionArgs) -> Result<()> {
    run_action(global, args.position, Action::Carry).await
}
