//! Trait for the mailbox token endpoint

use async_trait::async_trait;

use crate::errors::AuthError;

/// Exchanges mailbox credentials for a bearer token
#[async_trait]
pub trait MailboxAuthenticator: Send + Sync {
    /// Request a token for the given account
    async fn request_token(&self, address: &str, password: &str) -> Result<String, AuthError>;
}
