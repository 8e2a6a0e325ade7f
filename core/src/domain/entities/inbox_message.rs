//! Inbox message entity as listed by the mailbox API.
//!
//! The listing fields are optional on purpose: whether a message missing its
//! timestamp, sender or subject is acceptable is decided by the resolver, not
//! by the JSON decoder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sender identity of an inbox message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSender {
    /// Display name of the sender
    #[serde(default)]
    pub name: Option<String>,

    /// Mail address of the sender
    #[serde(default)]
    pub address: Option<String>,
}

impl MessageSender {
    /// Create a sender with both name and address
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            address: Some(address.into()),
        }
    }

    /// A sender object carrying neither name nor address
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none()
    }

    /// Name and address of the sender.
    ///
    /// Returns the name of the missing field when the sender is empty or
    /// lacks one of the two parts.
    pub fn identity(&self) -> Result<(&str, &str), &'static str> {
        if self.is_empty() {
            return Err("from");
        }
        let name = self.name.as_deref().ok_or("from.name")?;
        let address = self.address.as_deref().ok_or("from.address")?;
        Ok((name, address))
    }
}

/// Summary entry from the inbox listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    /// Opaque message identifier, unique per message
    pub id: String,

    /// When the mailbox received the message
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Sender identity
    #[serde(default)]
    pub from: Option<MessageSender>,

    /// Subject line
    #[serde(default)]
    pub subject: Option<String>,
}

impl InboxMessage {
    /// Create a fully populated listing entry
    pub fn new(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        from: MessageSender,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            created_at: Some(created_at),
            from: Some(from),
            subject: Some(subject.into()),
        }
    }

    /// Timestamp and sender of a message that carries every required field.
    ///
    /// Returns the name of the first missing field otherwise.
    pub fn required_fields(&self) -> Result<(DateTime<Utc>, &MessageSender), &'static str> {
        let created_at = self.created_at.ok_or("createdAt")?;
        let from = self.from.as_ref().ok_or("from")?;
        self.subject.as_ref().ok_or("subject")?;
        Ok((created_at, from))
    }
}

/// Full message content fetched by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    /// Message identifier
    #[serde(default)]
    pub id: String,

    /// Plain-text body; empty when the API omits it
    #[serde(default)]
    pub text: String,
}
