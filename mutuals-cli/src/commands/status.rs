//! Status command - authenticated account, counts, and rate limit.

use anyhow::Result;

use mutuals_api::{RelationKind, SetFetcher};

use crate::output::{JsonFormatter, TextFormatter, json::StatusOutput};
use crate::{Cli, OutputFormat};

use super::establish;

/// Runs the status command.
pub async fn run(cli: &Cli) -> Result<()> {
    let client = establish(cli)?;
    let login = client.viewer().await?;

    let fetcher = SetFetcher::new(&client);
    let followers = fetcher.fetch_all(&login, RelationKind::Followers).await?;
    let following = fetcher.fetch_all(&login, RelationKind::Following).await?;

    let output = StatusOutput {
        login,
        followers: followers.len(),
        following: following.len(),
        rate_limit: client.rate_limit(),
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).render(&output)?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_status(&output));
        }
    }

    Ok(())
}
