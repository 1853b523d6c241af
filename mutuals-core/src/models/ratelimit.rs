//! Rate-limit state as reported by the platform's response headers.

use chrono::DateTime;
use serde::Serialize;

/// Remaining-quota state, updated after every API call.
///
/// Both fields are `None` until the first response carrying the headers
/// has been seen. The API client owns one of these behind an accessor;
/// there is no process-global copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RateLimitState {
    /// Calls left in the current window.
    pub remaining: Option<u64>,
    /// Unix timestamp at which the window resets.
    pub reset_epoch: Option<i64>,
}

impl RateLimitState {
    /// Records the values parsed from a response's headers.
    pub fn update(&mut self, remaining: Option<u64>, reset_epoch: Option<i64>) {
        if remaining.is_some() {
            self.remaining = remaining;
        }
        if reset_epoch.is_some() {
            self.reset_epoch = reset_epoch;
        }
    }

    /// True once quota has dropped below `threshold`.
    pub fn is_low(&self, threshold: u64) -> bool {
        self.remaining.is_some_and(|r| r < threshold)
    }

    /// Human-readable reset time, or `"soon"` when not computable.
    pub fn reset_human(&self) -> String {
        self.reset_epoch
            .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
            .map_or_else(
                || "soon".to_string(),
                |at| at.format("%H:%M:%S UTC").to_string(),
            )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unknown() {
        let state = RateLimitState::default();
        assert_eq!(state.remaining, None);
        assert!(!state.is_low(10));
        assert_eq!(state.reset_human(), "soon");
    }

    #[test]
    fn test_update_keeps_known_values() {
        let mut state = RateLimitState::default();
        state.update(Some(42), Some(1_700_000_000));
        state.update(None, None);
        assert_eq!(state.remaining, Some(42));
        assert_eq!(state.reset_epoch, Some(1_700_000_000));
    }

    #[test]
    fn test_low_threshold() {
        let mut state = RateLimitState::default();
        state.update(Some(9), None);
        assert!(state.is_low(10));
        state.update(Some(10), None);
        assert!(!state.is_low(10));
    }

    #[test]
    fn test_reset_human_formats_epoch() {
        let mut state = RateLimitState::default();
        state.update(None, Some(0));
        assert_eq!(state.reset_human(), "00:00:00 UTC");
    }

    #[test]
    fn test_reset_human_falls_back_on_bad_epoch() {
        let mut state = RateLimitState::default();
        state.update(None, Some(i64::MAX));
        assert_eq!(state.reset_human(), "soon");
    }
}
