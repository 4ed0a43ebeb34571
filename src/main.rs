//! tasklog - Daily task log with business-day carry-forward

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tasklog::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("TASKLOG_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("tasklog=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Some(Commands::Completion { shell }) => {
            generate(shell, &mut Cli::command(), "tasklog", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Add(args)) => cli::add::run(&global, args).await,
        Some(Commands::Detail(args)) => cli::task::run_detail(&global, args).await,
        Some(Commands::Done(args)) => cli::task::run_done(&global, args).await,
        Some(Commands::Carry(args)) => cli::task::run_carry(&global, args).await,
        Some(Commands::Today(args)) => cli::today::run(&global, args).await,
        Some(Commands::Save) => cli::save::run_save(&global).await,
        Some(Commands::Export) => cli::save::run_export(&global).await,
        Some(Commands::Open(args)) => cli::open::run(&global, args).await,
        Some(Commands::Calendar { command }) => cli::calendar::run(&global, command).await,
        None => cli::today::run(&global, Default::default()).await,
    }
}
