//! Mailbox API configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_or;

/// Default mail.tm API root
pub const DEFAULT_MAILBOX_BASE_URL: &str = "https://api.mail.tm";

/// Mailbox (mail.tm compatible) API configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MailboxConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_MAILBOX_BASE_URL),
            request_timeout_secs: default_timeout(),
            accept_invalid_certs: false,
        }
    }
}

impl MailboxConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let base_url = super::env_non_empty("MAILBOX_BASE_URL")
            .unwrap_or_else(|| DEFAULT_MAILBOX_BASE_URL.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: env_or("MAILBOX_REQUEST_TIMEOUT_SECS", default_timeout()),
            accept_invalid_certs: env_or("MAILBOX_ACCEPT_INVALID_CERTS", false),
        }
    }

    /// Create a configuration pointing at a different API root
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Build an absolute endpoint URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn default_timeout() -> u64 {
    30
}
