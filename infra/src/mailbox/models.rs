//! Wire models for the mail.tm API

use serde::{Deserialize, Serialize};

/// Hydra collection envelope wrapping every mail.tm listing
#[derive(Debug, Clone, Deserialize)]
pub struct HydraCollection<T> {
    #[serde(rename = "hydra:member")]
    pub members: Vec<T>,
}

/// Entry of `GET /domains`
#[derive(Debug, Clone, Deserialize)]
pub struct DomainEntry {
    pub domain: String,
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
}

/// Body of `POST /token` and `POST /accounts`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub address: &'a str,
    pub password: &'a str,
}

/// Response of `POST /token`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Response of `POST /accounts`
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Result of creating a mailbox account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountOutcome {
    /// New account with its id
    Created { id: String, address: String },
    /// The address is already registered; its credentials can still log in
    AlreadyExists { address: String },
}

fn default_active() -> bool {
    true
}
