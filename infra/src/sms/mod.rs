//! SMS Store Module
//!
//! Reads inbound SMS from the telephony provider so phone targets can be
//! resolved. Only Twilio is supported; without credentials no store is built
//! and the resolver reports a configuration error for phone targets.

use std::sync::Arc;

use lf_core::services::SmsStore;
use lf_shared::SmsConfig;

#[cfg(feature = "twilio-sms")]
pub mod twilio;

#[cfg(feature = "twilio-sms")]
pub use twilio::TwilioSmsStore;

/// Create the SMS store for the configured provider
///
/// # Returns
///
/// `None` when credentials are missing or the provider is compiled out
pub fn create_sms_store(config: &SmsConfig) -> Option<Arc<dyn SmsStore>> {
    if !config.has_credentials() {
        tracing::warn!("TWILIO_ACCOUNT_SID / TWILIO_AUTH_TOKEN not set, phone verification disabled");
        return None;
    }

    build_provider(config)
}

#[cfg(feature = "twilio-sms")]
fn build_provider(config: &SmsConfig) -> Option<Arc<dyn SmsStore>> {
    match TwilioSmsStore::new(config) {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            tracing::error!("Failed to initialize Twilio SMS store: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "twilio-sms"))]
fn build_provider(_config: &SmsConfig) -> Option<Arc<dyn SmsStore>> {
    tracing::warn!("SMS provider support is not compiled in, phone verification disabled");
    None
}
