//! Shared utilities and configuration for the LoginFlow workspace
//!
//! This crate provides common functionality used across all workspace members:
//! - Configuration types loaded from the environment
//! - Utility functions (phone masking, address validation)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LogFormat, LoggingConfig, MailboxConfig, SmsConfig,
    VerificationConfig,
};
pub use utils::{phone, validation};
