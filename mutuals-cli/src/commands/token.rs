//! Token command - manage the stored API token.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use mutuals_api::{delete_token, resolve_token, store_token};

use crate::Cli;

/// Arguments for the token command.
#[derive(Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands.
#[derive(Subcommand)]
pub enum TokenCommand {
    /// Store a token in the system keychain.
    Set {
        /// The token value. Prompted for when omitted.
        #[arg(long)]
        token: Option<String>,
    },
    /// Remove the stored token from the keychain.
    Clear,
    /// Check whether a token currently resolves.
    Check,
}

/// Runs the token command.
pub fn run(args: &TokenArgs, cli: &Cli) -> Result<()> {
    match &args.command {
        TokenCommand::Set { token } => set(token.as_deref(), cli),
        TokenCommand::Clear => {
            delete_token().context("Failed to remove the stored token")?;
            if !cli.quiet {
                println!("Token removed");
            }
            Ok(())
        }
        TokenCommand::Check => match resolve_token() {
            Ok(_) => {
                println!("Token OK");
                Ok(())
            }
            Err(e) => bail!("No usable token: {e}"),
        },
    }
}

fn set(token: Option<&str>, cli: &Cli) -> Result<()> {
    let token = match token {
        Some(value) => value.trim().to_string(),
        None => prompt_for_token()?,
    };
    if token.is_empty() {
        bail!("Token must not be empty");
    }

    store_token(&token).context("Failed to store the token")?;
    if !cli.quiet {
        println!("Token stored in the system keychain");
    }
    Ok(())
}

fn prompt_for_token() -> Result<String> {
    eprint!("Paste token: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read token from stdin")?;
    Ok(line.trim().to_string())
}
