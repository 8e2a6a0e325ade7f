//! Error types reported by collaborators of the resolver
//!
//! - `AuthError`: mailbox login and session token failures
//! - `StoreError`: what a message or SMS store reports to the resolver
//! - `ValidationError`: rejected scenario input
//! - `ResolveStage`: which stage of a resolution failed

use std::fmt;
use thiserror::Error;

/// Mailbox authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Mailbox login rejected with status {status}: {body}")]
    LoginRejected { status: u16, body: String },

    #[error("Mailbox login response did not contain a token")]
    MissingToken,

    #[error("Mailbox login request failed: {message}")]
    Transport { message: String },

    #[error("Mailbox session holds no token; log in to the mailbox before reading it")]
    NotLoggedIn,
}

/// Errors reported by message and SMS store implementations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("request failed: {message}")]
    Transport { message: String },

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {message}")]
    Payload { message: String },

    #[error("store not configured: {message}")]
    Configuration { message: String },
}

/// Validation errors for scenario input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid login type: {login_type}")]
    UnknownLoginType { login_type: String },

    #[error("Invalid verification code: {value:?} is not six digits")]
    InvalidCode { value: String },

    #[error("Verification code must be {expected} digits and there must be {expected} input boxes, found {inputs}")]
    InputCountMismatch { inputs: usize, expected: usize },
}

/// Stage of a resolution, used to say where it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStage {
    /// Listing messages from the store
    Fetch,
    /// Checking and filtering the listed messages
    Filter,
    /// Reading the chosen body and extracting the code
    Extract,
}

impl fmt::Display for ResolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveStage::Fetch => write!(f, "fetch"),
            ResolveStage::Filter => write!(f, "filter"),
            ResolveStage::Extract => write!(f, "extract"),
        }
    }
}
