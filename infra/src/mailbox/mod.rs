//! Mailbox Module
//!
//! Client for the mail.tm API used as the scenarios' disposable inbox.
//!
//! ## Features
//!
//! - **Message Store**: inbox listing and message bodies for the resolver
//! - **Authenticator**: bearer token for the session
//! - **Account Setup**: domain listing and account creation

pub mod mail_tm;
pub mod models;

pub use mail_tm::MailTmClient;
pub use models::{AccountOutcome, HydraCollection};
