//! SMS provider configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{env_non_empty, env_or};

/// Default Twilio REST API root
pub const DEFAULT_TWILIO_BASE_URL: &str = "https://api.twilio.com";

/// SMS provider (Twilio) configuration
///
/// Credentials are optional here: a run that only exercises email flows does
/// not need them, and their absence is reported when a phone flow asks for a
/// code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Twilio Account SID
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio Auth Token
    #[serde(default)]
    pub auth_token: Option<String>,

    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            base_url: default_base_url(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let base_url = env_non_empty("TWILIO_BASE_URL").unwrap_or_else(default_base_url);

        Self {
            account_sid: env_non_empty("TWILIO_ACCOUNT_SID"),
            auth_token: env_non_empty("TWILIO_AUTH_TOKEN"),
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: env_or("TWILIO_REQUEST_TIMEOUT_SECS", default_timeout()),
        }
    }

    /// Create a configuration with credentials
    pub fn with_credentials(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: Some(account_sid.into()),
            auth_token: Some(auth_token.into()),
            ..Default::default()
        }
    }

    /// Set the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Both credentials, if configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.account_sid, &self.auth_token) {
            (Some(sid), Some(token)) if !sid.is_empty() && !token.is_empty() => {
                Some((sid.as_str(), token.as_str()))
            }
            _ => None,
        }
    }

    /// Check whether credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_some()
    }

    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_base_url() -> String {
    String::from(DEFAULT_TWILIO_BASE_URL)
}

fn default_timeout() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_parts() {
        assert!(!SmsConfig::default().has_credentials());

        let partial = SmsConfig {
            account_sid: Some("ACtest".to_string()),
            ..Default::default()
        };
        assert!(partial.credentials().is_none());

        let empty_token = SmsConfig::with_credentials("ACtest", "");
        assert!(!empty_token.has_credentials());

        let full = SmsConfig::with_credentials("ACtest", "secret");
        assert_eq!(full.credentials(), Some(("ACtest", "secret")));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = SmsConfig::default().with_base_url("http://localhost:9000/");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
    }
}
