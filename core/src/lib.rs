//! # LoginFlow Core
//!
//! Domain layer for the login-scenario support code. It turns a verification
//! target (a mail sender or a phone number) into the one-time code the page
//! under test is waiting for.
//!
//! The crate holds the domain entities, the error taxonomy, the store traits
//! implemented by the infrastructure layer, and the resolver and session
//! services that sit between them.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
