//! # Infrastructure Layer
//!
//! Concrete implementations of the core store traits:
//! - **Mailbox**: mail.tm REST client (inbox listing, message bodies, login,
//!   account setup)
//! - **SMS**: Twilio REST client for inbound messages
//!
//! ## Features
//!
//! - `twilio-sms`: Enable the Twilio SMS store (default)

use std::sync::Arc;

use lf_core::errors::{AuthError, StoreError};
use lf_core::services::{MailboxSession, ResolverConfig, SmsStore, VerificationCodeResolver};
use lf_shared::AppConfig;

/// Mailbox module - mail.tm client
pub mod mailbox;

/// SMS module - inbound SMS providers
pub mod sms;

pub use mailbox::{AccountOutcome, MailTmClient};
pub use sms::create_sms_store;

/// Infrastructure service container
///
/// Holds one mailbox client, the optional SMS store, and the mailbox session
/// shared by the login step and every resolver built from it.
#[derive(Clone)]
pub struct InfrastructureServices {
    /// mail.tm client
    pub mailbox: Arc<MailTmClient>,
    /// SMS store, absent without provider credentials
    pub sms: Option<Arc<dyn SmsStore>>,
    /// Mailbox session
    pub session: Arc<MailboxSession>,
    /// Configuration the services were built from
    pub config: AppConfig,
}

impl InfrastructureServices {
    /// Build every infrastructure service from configuration
    ///
    /// No network calls are made here.
    pub fn initialize(config: AppConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(environment = %config.environment, "Initializing infrastructure services...");

        let mailbox = Arc::new(MailTmClient::new(config.mailbox.clone())?);
        let sms = create_sms_store(&config.sms);

        tracing::info!(
            sms_enabled = sms.is_some(),
            "Infrastructure services initialized successfully"
        );

        Ok(Self {
            mailbox,
            sms,
            session: Arc::new(MailboxSession::new()),
            config,
        })
    }

    /// Log the shared session into the mailbox
    pub async fn login(&self, address: &str, password: &str) -> Result<(), InfrastructureError> {
        self.session
            .login(self.mailbox.as_ref(), address, password)
            .await?;
        Ok(())
    }

    /// Build a resolver wired to these services
    pub fn resolver(&self) -> VerificationCodeResolver {
        let resolver = VerificationCodeResolver::new(
            Arc::clone(&self.session),
            ResolverConfig::from(&self.config.verification),
        )
        .with_message_store(self.mailbox.clone());

        match &self.sms {
            Some(store) => resolver.with_sms_store(Arc::clone(store)),
            None => resolver,
        }
    }
}

/// Load configuration from dotenv files and the environment
pub fn load_config() -> AppConfig {
    if let Some(path) = lf_shared::config::load_dotenv() {
        tracing::debug!(path = %path.display(), "Loaded dotenv file");
    }
    AppConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction or request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mailbox API error
    #[error("Mailbox error: {0}")]
    Mailbox(#[from] StoreError),

    /// Mailbox login error
    #[error("Mailbox login error: {0}")]
    Auth(#[from] AuthError),
}
