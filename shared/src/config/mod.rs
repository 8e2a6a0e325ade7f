//! Configuration module with per-service sub-modules
//!
//! - `environment` - Environment detection and logging configuration
//! - `mailbox` - Mailbox (mail.tm) API configuration
//! - `sms` - SMS provider (Twilio) configuration
//! - `verification` - Verification code resolution settings

pub mod environment;
pub mod mailbox;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mailbox::MailboxConfig;
pub use sms::SmsConfig;
pub use verification::VerificationConfig;

/// Candidate dotenv files, first match wins
const DOTENV_PATHS: &[&str] = &["configs/.env", ".env"];

/// Complete configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Mailbox API configuration
    #[serde(default)]
    pub mailbox: MailboxConfig,

    /// SMS provider configuration
    #[serde(default)]
    pub sms: SmsConfig,

    /// Verification code resolution settings
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            logging: LoggingConfig::for_environment(env),
            mailbox: MailboxConfig::default(),
            sms: SmsConfig::default(),
            verification: VerificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            logging: LoggingConfig::from_env(environment),
            mailbox: MailboxConfig::from_env(),
            sms: SmsConfig::from_env(),
            verification: VerificationConfig::from_env(),
        }
    }

    /// Load the first dotenv file found, then read the environment
    pub fn load() -> Self {
        load_dotenv();
        Self::from_env()
    }
}

/// Load `configs/.env` (or `.env`) into the process environment if present.
///
/// Variables already set in the environment take precedence.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    DOTENV_PATHS
        .iter()
        .find_map(|path| dotenvy::from_path(path).ok().map(|_| std::path::PathBuf::from(path)))
}

/// Read an environment variable and parse it, falling back to `default`
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a non-empty environment variable
pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
