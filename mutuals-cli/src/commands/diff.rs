//! Diff command - show the reconciled follower/following sets.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::info;

use mutuals_sync::{ActionExecutor, NeverConfirm, SyncOrchestrator};

use crate::output::{JsonFormatter, TextFormatter, json::DiffOutput};
use crate::{Cli, OutputFormat};

use super::establish;

/// Arguments for the diff command.
#[derive(Args, Default)]
pub struct DiffArgs {
    /// Account to reconcile (defaults to the authenticated account).
    #[arg(long, short)]
    pub user: Option<String>,
}

/// Runs the diff command.
pub async fn run(args: &DiffArgs, cli: &Cli) -> Result<()> {
    let client = establish(cli)?;
    let executor = ActionExecutor::new(&client);
    let orchestrator = SyncOrchestrator::new(&client, executor, Arc::new(NeverConfirm));

    let subject = match &args.user {
        Some(user) => user.clone(),
        None => orchestrator.identity().await?,
    };
    info!(%subject, "Reconciling");

    let reconciliation = orchestrator.preview(Some(&subject)).await?;

    match cli.format {
        OutputFormat::Json => {
            let output = DiffOutput::new(&subject, &reconciliation);
            println!("{}", JsonFormatter::new(cli.pretty).render(&output)?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_reconciliation(&subject, &reconciliation));
        }
    }

    Ok(())
}
