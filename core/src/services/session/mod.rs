//! Mailbox session module
//!
//! Holds the bearer token for the mailbox account used by one test session.
//! The token is acquired once and reused; it is never refreshed.

mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use service::MailboxSession;
pub use traits::MailboxAuthenticator;
