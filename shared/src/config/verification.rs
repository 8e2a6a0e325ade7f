//! Verification code resolution settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_or;

/// Default recency window for candidate messages (5 minutes)
pub const DEFAULT_WINDOW_MINUTES: i64 = 5;

/// Largest accepted recency window (one year)
pub const MAX_WINDOW_MINUTES: i64 = 365 * 24 * 60;

/// Default cap on SMS results inspected per resolution
pub const DEFAULT_SMS_LIMIT: u32 = 10;

/// Settings for turning inbox/SMS contents into a verification code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Only messages newer than `now - window_minutes` are candidates
    #[serde(default = "default_window")]
    pub window_minutes: i64,

    /// Maximum number of SMS messages requested from the provider
    #[serde(default = "default_sms_limit")]
    pub sms_limit: u32,

    /// Delay between inspecting successive inbox candidates, in milliseconds
    #[serde(default)]
    pub pacing_ms: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_WINDOW_MINUTES,
            sms_limit: DEFAULT_SMS_LIMIT,
            pacing_ms: 0,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            window_minutes: clamp_window(env_or("VERIFICATION_WINDOW_MINUTES", DEFAULT_WINDOW_MINUTES)),
            sms_limit: env_or("VERIFICATION_SMS_LIMIT", DEFAULT_SMS_LIMIT).max(1),
            pacing_ms: env_or("VERIFICATION_PACING_MS", 0),
        }
    }

    /// Pacing delay as a duration
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

/// Bound a window to `1..=MAX_WINDOW_MINUTES`
pub fn clamp_window(minutes: i64) -> i64 {
    minutes.clamp(1, MAX_WINDOW_MINUTES)
}

fn default_window() -> i64 {
    DEFAULT_WINDOW_MINUTES
}

fn default_sms_limit() -> u32 {
    DEFAULT_SMS_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_window() {
        assert_eq!(clamp_window(5), 5);
        assert_eq!(clamp_window(0), 1);
        assert_eq!(clamp_window(-30), 1);
        assert_eq!(clamp_window(1_000_000_000_000), MAX_WINDOW_MINUTES);
    }
}
