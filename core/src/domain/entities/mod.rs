//! Domain entities read from the mailbox and SMS providers.

pub mod inbox_message;
pub mod sms_message;
pub mod verification_code;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use inbox_message::{InboxMessage, MessageContent, MessageSender};
pub use sms_message::{SmsMessage, SmsQuery};
pub use verification_code::{VerificationCode, CODE_LENGTH};
