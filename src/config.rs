//! Coordinator configuration from environment variables

use std::env;

/// Tuning for [`MoveCoordinator`](crate::game::MoveCoordinator)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Upper bound on read-evaluate-commit cycles for a single request.
    /// Two contending players never come close; this only bounds a store
    /// that keeps reporting conflicts.
    pub max_commit_attempts: u32,

    /// Let a Black move that makes an exact five win even when the same
    /// stone also forms a forbidden shape. Off by default: the forbidden
    /// check runs first and rejects the move.
    pub five_beats_forbidden: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_commit_attempts: 32,
            five_beats_forbidden: false,
        }
    }
}

impl CoordinatorConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_commit_attempts: env::var("RENJU_MAX_COMMIT_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &u32| n > 0)
                .unwrap_or(defaults.max_commit_attempts),
            five_beats_forbidden: env::var("RENJU_FIVE_BEATS_FORBIDDEN")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.five_beats_forbidden),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
