//! Configuration for the verification code resolver

use chrono::Duration;
use lf_shared::config::verification::{clamp_window, DEFAULT_SMS_LIMIT, DEFAULT_WINDOW_MINUTES};
use lf_shared::VerificationConfig;

/// Configuration for the verification code resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Candidates must be newer than `now - window`
    pub window: Duration,
    /// Maximum number of SMS messages inspected
    pub sms_limit: u32,
    /// Delay before inspecting each inbox candidate
    pub pacing: std::time::Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            window: Duration::minutes(DEFAULT_WINDOW_MINUTES),
            sms_limit: DEFAULT_SMS_LIMIT,
            pacing: std::time::Duration::ZERO,
        }
    }
}

impl From<&VerificationConfig> for ResolverConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            window: Duration::try_minutes(clamp_window(config.window_minutes))
                .unwrap_or_else(|| Duration::minutes(DEFAULT_WINDOW_MINUTES)),
            sms_limit: config.sms_limit,
            pacing: config.pacing(),
        }
    }
}
