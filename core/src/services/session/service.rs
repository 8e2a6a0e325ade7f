//! Mailbox session holding the bearer token for one test session

use tokio::sync::Mutex;

use super::traits::MailboxAuthenticator;
use crate::errors::AuthError;

/// Per-session holder of the mailbox bearer token.
///
/// `login` is a no-op once a token is held: there is no refresh, so an
/// expired token surfaces as an upstream error on the next inbox read.
/// The lock is held across the token request so concurrent logins on the
/// same session issue a single request.
#[derive(Debug, Default)]
pub struct MailboxSession {
    token: Mutex<Option<String>>,
}

impl MailboxSession {
    /// Create a session without a token
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session around an existing token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    /// Log in to the mailbox unless a token is already held
    ///
    /// # Arguments
    ///
    /// * `authenticator` - Token endpoint client
    /// * `address` - Mailbox account address
    /// * `password` - Mailbox account password
    ///
    /// # Returns
    ///
    /// * `Ok(())` - A token is held after the call
    /// * `Err(AuthError)` - The token endpoint rejected the login or returned no token
    pub async fn login(
        &self,
        authenticator: &dyn MailboxAuthenticator,
        address: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let mut token = self.token.lock().await;
        if token.is_some() {
            tracing::info!(address = address, "Already logged in to mailbox, reusing token");
            return Ok(());
        }

        let issued = authenticator.request_token(address, password).await?;
        if issued.trim().is_empty() {
            tracing::error!(address = address, "Mailbox token endpoint returned an empty token");
            return Err(AuthError::MissingToken);
        }

        tracing::info!(address = address, "Mailbox login successful");
        *token = Some(issued);
        Ok(())
    }

    /// Current token, if logged in
    pub async fn token(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    /// Check whether a token is held
    pub async fn is_logged_in(&self) -> bool {
        self.token.lock().await.is_some()
    }

    /// Value for the `Authorization` header, if logged in
    pub async fn authorization_header(&self) -> Option<String> {
        self.token().await.map(|token| format!("Bearer {}", token))
    }
}
