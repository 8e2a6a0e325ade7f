//! Traits for the mailbox and SMS stores read by the resolver

use async_trait::async_trait;

use crate::domain::entities::{InboxMessage, MessageContent, SmsMessage, SmsQuery};
use crate::errors::StoreError;

/// Mailbox API holding the verification emails
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// List the inbox of the account owning `token`
    async fn list_messages(&self, token: &str) -> Result<Vec<InboxMessage>, StoreError>;
    /// Fetch the full content of one message
    async fn get_message(&self, token: &str, id: &str) -> Result<MessageContent, StoreError>;
}

/// Telephony API holding the verification texts
#[async_trait]
pub trait SmsStore: Send + Sync {
    /// List messages matching the query, newest first
    async fn list_messages(&self, query: &SmsQuery) -> Result<Vec<SmsMessage>, StoreError>;
    /// Provider name for logs
    fn provider_name(&self) -> &str;
}
