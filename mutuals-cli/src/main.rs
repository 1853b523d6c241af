// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! mutuals CLI - follower/following reconciliation from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Show who doesn't follow you back (and vice versa)
//! mutuals diff
//!
//! # Same, for another account
//! mutuals diff --user octocat
//!
//! # Preview unfollows, then confirm interactively
//! mutuals unfollow
//!
//! # Unfollow non-followers without prompting
//! mutuals unfollow --yes
//!
//! # Follow back only specific accounts
//! mutuals follow-back --only alice,bob
//!
//! # Full two-phase sync, dry run
//! mutuals sync --dry-run
//!
//! # Account and rate-limit status
//! mutuals status
//!
//! # Store a token in the system keychain
//! mutuals token set
//! ```

mod commands;
mod output;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mutuals_api::ApiError;
use mutuals_sync::SyncError;

use commands::{actions, diff, status, token};

// ============================================================================
// CLI Definition
// ============================================================================

/// mutuals CLI - reconcile your follower and following lists.
#[derive(Parser)]
#[command(name = "mutuals")]
#[command(about = "Follower/following reconciliation CLI")]
#[command(long_about = r#"
mutuals compares the accounts that follow you with the accounts you
follow, then closes the gap: unfollow the ones that never followed
back, follow back the ones you missed, or run both phases in one sync.

Every mutating command previews its targets first and asks before
touching the network; --yes skips the prompt, --dry-run skips the
mutations entirely.

Examples:
  mutuals diff                   # Who doesn't follow back, both ways
  mutuals unfollow               # Preview, confirm, unfollow
  mutuals follow-back --yes      # Follow back without prompting
  mutuals sync --dry-run         # Preview the full two-phase sync
  mutuals status                 # Login, counts, rate limit
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'diff' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Skip confirmation prompts and apply immediately.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the reconciled follower/following sets (default command).
    #[command(visible_alias = "d")]
    Diff(diff::DiffArgs),

    /// Unfollow accounts that do not follow you back.
    #[command(visible_alias = "u")]
    Unfollow(actions::ActionArgs),

    /// Follow back followers you do not follow yet.
    #[command(visible_alias = "fb")]
    FollowBack(actions::ActionArgs),

    /// Run both phases: unfollow non-followers, then follow back.
    #[command(visible_alias = "s")]
    Sync(actions::SyncArgs),

    /// Show the authenticated account and rate-limit state.
    Status,

    /// Manage the stored API token.
    Token(token::TokenArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Authentication failed; the token needs attention.
    Auth = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("mutuals=debug,info")
    } else {
        EnvFilter::new("mutuals=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Diff(args)) => diff::run(args, &cli).await,
        Some(Commands::Unfollow(args)) => actions::unfollow(args, &cli).await,
        Some(Commands::FollowBack(args)) => actions::follow_back(args, &cli).await,
        Some(Commands::Sync(args)) => actions::sync(args, &cli).await,
        Some(Commands::Status) => status::run(&cli).await,
        Some(Commands::Token(args)) => token::run(args, &cli),
        None => {
            // Default to diff command
            diff::run(&diff::DiffArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(exit_code(&e) as i32);
    }

    Ok(())
}

/// Picks the exit code for a failed run.
///
/// Auth failures get their own code so wrappers can re-prompt for a
/// token instead of retrying blindly.
fn exit_code(error: &anyhow::Error) -> ExitCode {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<SyncError>() {
            if e.is_auth() {
                return ExitCode::Auth;
            }
        }
        if let Some(e) = cause.downcast_ref::<ApiError>() {
            if e.is_auth() {
                return ExitCode::Auth;
            }
        }
    }
    ExitCode::Error
}
