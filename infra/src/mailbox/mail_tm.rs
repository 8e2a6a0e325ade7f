//! mail.tm API client
//!
//! Implements the core `MessageStore` and `MailboxAuthenticator` traits over
//! the mail.tm REST API, plus the account setup calls the scenarios need
//! before their first login.

use async_trait::async_trait;
use lf_core::domain::entities::{InboxMessage, MessageContent};
use lf_core::errors::{AuthError, StoreError};
use lf_core::services::{MailboxAuthenticator, MessageStore};
use lf_shared::validation::{is_valid_email, split_email};
use lf_shared::MailboxConfig;
use rand::{distributions::Alphanumeric, Rng};
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use super::models::{
    AccountOutcome, AccountResponse, Credentials, DomainEntry, HydraCollection, TokenResponse,
};
use crate::InfrastructureError;

/// Length of generated mailbox local parts
const GENERATED_LOCAL_PART_LEN: usize = 10;

/// mail.tm API client
#[derive(Debug, Clone)]
pub struct MailTmClient {
    client: Client,
    config: MailboxConfig,
}

impl MailTmClient {
    /// Create a new client
    pub fn new(config: MailboxConfig) -> Result<Self, InfrastructureError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(headers)
            .build()?;

        info!(base_url = %config.base_url, "Mailbox client initialized");
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(MailboxConfig::from_env())
    }

    /// Client configuration
    pub fn config(&self) -> &MailboxConfig {
        &self.config
    }

    /// List the active mail domains accounts can be created under
    pub async fn list_domains(&self) -> Result<Vec<String>, InfrastructureError> {
        let url = self.config.endpoint("/domains");
        let page: HydraCollection<DomainEntry> = fetch_json(self.client.get(&url)).await?;
        let domains: Vec<String> = page
            .members
            .into_iter()
            .filter(|d| d.is_active)
            .map(|d| d.domain)
            .collect();
        debug!(count = domains.len(), "Fetched mailbox domains");
        Ok(domains)
    }

    /// Build an address on the first advertised domain
    ///
    /// # Arguments
    ///
    /// * `local_part` - Local part to use, or `None` for a random one
    pub async fn generate_address(&self, local_part: Option<&str>) -> Result<String, InfrastructureError> {
        let domains = self.list_domains().await?;
        let domain = domains.first().ok_or_else(|| {
            InfrastructureError::Mailbox(StoreError::Payload {
                message: "mailbox service advertised no domains".to_string(),
            })
        })?;

        let local_part = match local_part.map(str::trim).filter(|l| !l.is_empty()) {
            Some(local) => local.to_lowercase(),
            None => random_local_part(),
        };
        Ok(format!("{}@{}", local_part, domain))
    }

    /// Register a mailbox account
    ///
    /// An address that is already registered is not an error: the scenario
    /// logs in with the same credentials on every run.
    pub async fn create_account(
        &self,
        address: &str,
        password: &str,
    ) -> Result<AccountOutcome, InfrastructureError> {
        let domain = split_email(address)
            .filter(|_| is_valid_email(address))
            .map(|(_, domain)| domain)
            .ok_or_else(|| InfrastructureError::Config(format!("invalid mailbox address: {}", address)))?;
        debug!(address = address, domain = domain, "Creating mailbox account");

        let url = self.config.endpoint("/accounts");
        let response = self
            .client
            .post(&url)
            .json(&Credentials { address, password })
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => {
                let account: AccountResponse = response.json().await.map_err(|e| {
                    InfrastructureError::Mailbox(StoreError::Payload {
                        message: e.to_string(),
                    })
                })?;
                info!(address = address, account_id = %account.id, "Mailbox account created");
                Ok(AccountOutcome::Created {
                    id: account.id,
                    address: account.address.unwrap_or_else(|| address.to_string()),
                })
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                warn!(address = address, "Mailbox address already in use");
                Ok(AccountOutcome::AlreadyExists {
                    address: address.to_string(),
                })
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                error!(address = address, status = status.as_u16(), "Failed to create mailbox account");
                Err(InfrastructureError::Mailbox(StoreError::Status {
                    status: status.as_u16(),
                    body,
                }))
            }
        }
    }
}

#[async_trait]
impl MessageStore for MailTmClient {
    async fn list_messages(&self, token: &str) -> Result<Vec<InboxMessage>, StoreError> {
        let url = self.config.endpoint("/messages");
        let page: HydraCollection<InboxMessage> =
            fetch_json(self.client.get(&url).bearer_auth(token)).await?;
        debug!(count = page.members.len(), "Fetched inbox page");
        Ok(page.members)
    }

    async fn get_message(&self, token: &str, id: &str) -> Result<MessageContent, StoreError> {
        let url = self.config.endpoint(&format!("/messages/{}", id));
        debug!(message_id = id, "Fetching message content");
        fetch_json(self.client.get(&url).bearer_auth(token)).await
    }
}

#[async_trait]
impl MailboxAuthenticator for MailTmClient {
    async fn request_token(&self, address: &str, password: &str) -> Result<String, AuthError> {
        let url = self.config.endpoint("/token");
        let response = self
            .client
            .post(&url)
            .json(&Credentials { address, password })
            .send()
            .await
            .map_err(|e| AuthError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(address = address, status = status.as_u16(), "Mailbox login failed");
            return Err(AuthError::LoginRejected {
                status: status.as_u16(),
                body,
            });
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .ok()
            .and_then(|r| r.token)
            .filter(|t| !t.is_empty());

        match token {
            Some(token) => Ok(token),
            None => {
                error!(address = address, "Mailbox token response carried no token");
                Err(AuthError::MissingToken)
            }
        }
    }
}

/// Send a request and decode a 200 JSON response
async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, StoreError> {
    let response = request.send().await.map_err(transport_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Mailbox request returned non-success status");
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&body).map_err(|e| StoreError::Payload {
        message: e.to_string(),
    })
}

fn transport_error(e: reqwest::Error) -> StoreError {
    StoreError::Transport {
        message: e.to_string(),
    }
}

fn random_local_part() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_LOCAL_PART_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}
