//! Value objects describing which verification code a scenario is after.

pub mod channel;
pub mod identity;

pub use channel::Channel;
pub use identity::{PhoneTarget, SenderFilter, VerificationTarget};
