//! Command implementations.

pub mod actions;
pub mod diff;
pub mod status;
pub mod token;

use std::sync::Arc;

use anyhow::{Context, Result};

use mutuals_api::{ApiClient, ReqwestTransport, resolve_token};
use mutuals_core::{NullReporter, Reporter};
use mutuals_sync::{AlwaysConfirm, Confirmer, NeverConfirm};

use crate::Cli;
use crate::report::{StdinConfirmer, TermReporter};

/// Builds the authenticated API client shared by all network commands.
pub fn establish(cli: &Cli) -> Result<ApiClient> {
    let token = resolve_token().context("No API token available")?;

    let reporter: Arc<dyn Reporter> = if cli.quiet {
        Arc::new(NullReporter)
    } else {
        Arc::new(TermReporter::new(!cli.no_color))
    };

    Ok(ApiClient::new(
        Arc::new(ReqwestTransport::new()),
        token,
        reporter,
    ))
}

/// Resolves a mutating command's flags into an execution plan.
///
/// Three modes:
/// - `--dry-run`: preview only, never prompt, never mutate.
/// - `--yes`: mutate immediately, no preview pass.
/// - neither: dry-run preview first, then prompt to apply for real.
pub fn plan(dry_run: bool, yes: bool) -> (bool, Arc<dyn Confirmer>) {
    if dry_run {
        (true, Arc::new(NeverConfirm))
    } else if yes {
        (false, Arc::new(AlwaysConfirm))
    } else {
        (true, Arc::new(StdinConfirmer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dry_run_never_confirms() {
        let (dry, confirmer) = plan(true, false);
        assert!(dry);
        assert!(!confirmer.confirm("apply?"));
    }

    #[test]
    fn test_yes_skips_the_preview_pass() {
        let (dry, _) = plan(false, true);
        assert!(!dry);
    }

    #[test]
    fn test_dry_run_wins_over_yes() {
        let (dry, confirmer) = plan(true, true);
        assert!(dry);
        assert!(!confirmer.confirm("apply?"));
    }

    #[test]
    fn test_default_is_preview_then_prompt() {
        let (dry, _) = plan(false, false);
        assert!(dry);
    }
}
