//! SMS message entity and the query used to list them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inbound SMS message as returned by the telephony provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    /// Message text
    pub body: String,
    /// When the provider sent the message
    pub date_sent: DateTime<Utc>,
    /// Destination number (region code and number concatenated)
    pub to: String,
}

/// Filter for listing SMS messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsQuery {
    /// Destination number to read messages for
    pub to: String,
    /// Only messages sent strictly after this instant
    pub date_sent_after: DateTime<Utc>,
    /// Maximum number of messages returned, newest first
    pub limit: u32,
}
