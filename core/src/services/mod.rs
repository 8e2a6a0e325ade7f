//! Services: the mailbox session and the verification code resolver.

pub mod clock;
pub mod session;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use session::{MailboxAuthenticator, MailboxSession};
pub use verification::{
    MessageStore, ResolverConfig, SmsStore, VerificationCodeResolver,
};
