//! Error taxonomy for verification code resolution.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, ResolveStage, StoreError, ValidationError};

use thiserror::Error;

/// Errors that abort a verification code resolution
///
/// Every variant is a hard failure for the calling scenario step; there is no
/// fallback code.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("External service error at {stage} stage for {target} (window {window_minutes} minutes): {source}")]
    ExternalService {
        stage: ResolveStage,
        target: String,
        window_minutes: i64,
        #[source]
        source: StoreError,
    },

    #[error("Malformed message {message_id} at filter stage for {target} (window {window_minutes} minutes): missing field `{field}`")]
    MalformedMessage {
        message_id: String,
        field: &'static str,
        target: String,
        window_minutes: i64,
    },

    #[error("No verification code found at {stage} stage for {target} within the last {window_minutes} minutes")]
    NotFound {
        stage: ResolveStage,
        target: String,
        window_minutes: i64,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ResolveError {
    /// Stage the resolution failed at, when it got that far
    pub fn stage(&self) -> Option<ResolveStage> {
        match self {
            ResolveError::ExternalService { stage, .. } | ResolveError::NotFound { stage, .. } => {
                Some(*stage)
            }
            ResolveError::MalformedMessage { .. } => Some(ResolveStage::Filter),
            ResolveError::Configuration { .. } | ResolveError::Auth(_) => None,
        }
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
