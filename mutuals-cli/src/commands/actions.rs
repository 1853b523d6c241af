//! Mutating commands: unfollow, follow-back, and the two-phase sync.

use anyhow::Result;
use clap::Args;

use mutuals_core::RunSummary;
use mutuals_sync::{ActionExecutor, SyncOrchestrator, SyncReport};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

use super::{establish, plan};

/// Arguments shared by the single-phase mutating commands.
#[derive(Args, Default)]
pub struct ActionArgs {
    /// Preview only; make no changes.
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Restrict to these handles (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Arguments for the sync command.
#[derive(Args, Default)]
pub struct SyncArgs {
    /// Preview only; make no changes.
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

/// Runs the unfollow command.
pub async fn unfollow(args: &ActionArgs, cli: &Cli) -> Result<()> {
    let client = establish(cli)?;
    let (dry_run, confirmer) = plan(args.dry_run, cli.yes);
    let orchestrator = SyncOrchestrator::new(&client, ActionExecutor::new(&client), confirmer);

    let summary = orchestrator
        .unfollow_non_followers(dry_run, only(&args.only))
        .await?;
    emit_summary(&summary, cli)
}

/// Runs the follow-back command.
pub async fn follow_back(args: &ActionArgs, cli: &Cli) -> Result<()> {
    let client = establish(cli)?;
    let (dry_run, confirmer) = plan(args.dry_run, cli.yes);
    let orchestrator = SyncOrchestrator::new(&client, ActionExecutor::new(&client), confirmer);

    let summary = orchestrator.follow_back(dry_run, only(&args.only)).await?;
    emit_summary(&summary, cli)
}

/// Runs the sync command.
pub async fn sync(args: &SyncArgs, cli: &Cli) -> Result<()> {
    let client = establish(cli)?;
    let (dry_run, confirmer) = plan(args.dry_run, cli.yes);
    let orchestrator = SyncOrchestrator::new(&client, ActionExecutor::new(&client), confirmer);

    let report = orchestrator.auto_sync(dry_run).await?;
    emit_report(&report, cli)
}

fn only(names: &[String]) -> Option<&[String]> {
    if names.is_empty() { None } else { Some(names) }
}

fn emit_summary(summary: &RunSummary, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).render(summary)?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_summary(summary));
        }
    }
    Ok(())
}

fn emit_report(report: &SyncReport, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).render(report)?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_sync(report));
        }
    }
    Ok(())
}
