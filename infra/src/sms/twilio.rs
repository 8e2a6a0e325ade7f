//! Twilio SMS Store Implementation
//!
//! Lists inbound messages through the Twilio REST API (`Messages.json`),
//! filtered by destination number and send date.
//!
//! ## Features
//!
//! - HTTP basic auth with the account SID and auth token
//! - Server-side `To` / `DateSent>` filters, re-applied on the client since
//!   the API matches dates coarsely
//! - Security: Phone number masking in logs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lf_core::domain::entities::{SmsMessage, SmsQuery};
use lf_core::errors::StoreError;
use lf_core::services::SmsStore;
use lf_shared::phone::mask_phone_number;
use lf_shared::SmsConfig;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::InfrastructureError;

/// Format Twilio expects for `DateSent` filters
const DATE_FILTER_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Page of messages returned by `Messages.json`
#[derive(Debug, Deserialize)]
struct MessagePage {
    #[serde(default)]
    messages: Vec<TwilioMessage>,
}

/// Message resource; only the fields the resolver reads
#[derive(Debug, Deserialize)]
struct TwilioMessage {
    #[serde(default)]
    body: Option<String>,
    /// RFC 2822 timestamp, null while the message is queued
    #[serde(default)]
    date_sent: Option<String>,
    #[serde(default)]
    to: Option<String>,
}

/// Twilio-backed SMS store
#[derive(Debug, Clone)]
pub struct TwilioSmsStore {
    client: Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

impl TwilioSmsStore {
    /// Create a new store
    ///
    /// Fails with a configuration error when either credential is missing.
    pub fn new(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let (account_sid, auth_token) = config.credentials().ok_or_else(|| {
            InfrastructureError::Config(
                "TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN must both be set".to_string(),
            )
        })?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        info!(base_url = %config.base_url, "Twilio SMS store initialized");

        Ok(Self {
            client,
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(&SmsConfig::from_env())
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl SmsStore for TwilioSmsStore {
    async fn list_messages(&self, query: &SmsQuery) -> Result<Vec<SmsMessage>, StoreError> {
        debug!(
            to = %mask_phone_number(&query.to),
            after = %query.date_sent_after,
            limit = query.limit,
            "Listing Twilio messages"
        );

        let date_filter = query.date_sent_after.format(DATE_FILTER_FORMAT).to_string();
        let page_size = query.limit.to_string();

        let response = self
            .client
            .get(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .query(&[
                ("To", query.to.as_str()),
                ("DateSent>", date_filter.as_str()),
                ("PageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(
                to = %mask_phone_number(&query.to),
                status = status.as_u16(),
                "Twilio message listing failed"
            );
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let page: MessagePage = response.json().await.map_err(|e| StoreError::Payload {
            message: e.to_string(),
        })?;

        let messages = into_sms_messages(page, query)?;
        debug!(
            to = %mask_phone_number(&query.to),
            count = messages.len(),
            "Twilio messages within the window"
        );
        Ok(messages)
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}

/// Convert a page into messages sent strictly after the cutoff, in API order
fn into_sms_messages(page: MessagePage, query: &SmsQuery) -> Result<Vec<SmsMessage>, StoreError> {
    let mut messages = Vec::new();

    for raw in page.messages {
        let Some(date_sent) = raw.date_sent.as_deref() else {
            continue;
        };
        let date_sent = parse_date_sent(date_sent)?;
        if date_sent <= query.date_sent_after {
            continue;
        }

        messages.push(SmsMessage {
            body: raw.body.unwrap_or_default(),
            date_sent,
            to: raw.to.unwrap_or_else(|| query.to.clone()),
        });

        if messages.len() >= query.limit as usize {
            break;
        }
    }

    Ok(messages)
}

fn parse_date_sent(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc2822(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| StoreError::Payload {
            message: format!("invalid date_sent `{}`: {}", value, e),
        })
}
