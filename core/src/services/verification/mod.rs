//! Verification code resolution module
//!
//! Turns a verification target into the one-time code waiting for it:
//! - Email: list the session's inbox, keep recent mail from the expected
//!   sender, read the newest body and extract the code
//! - Phone: list recent SMS sent to the number and take the first code found

mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::ResolverConfig;
pub use service::VerificationCodeResolver;
pub use traits::{MessageStore, SmsStore};
