//! Main verification code resolver implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::{InboxMessage, SmsQuery, VerificationCode};
use crate::domain::value_objects::{PhoneTarget, SenderFilter, VerificationTarget};
use crate::errors::{AuthError, ResolveError, ResolveResult, ResolveStage, StoreError};
use crate::services::clock::{Clock, SystemClock};
use crate::services::session::MailboxSession;

use super::config::ResolverConfig;
use super::traits::{MessageStore, SmsStore};

/// Resolver turning a verification target into its one-time code
///
/// Stores are optional: a resolver built without an SMS store reports a
/// configuration error for phone targets instead of touching the network.
pub struct VerificationCodeResolver {
    /// Mailbox API for the email channel
    message_store: Option<Arc<dyn MessageStore>>,
    /// Telephony API for the phone channel
    sms_store: Option<Arc<dyn SmsStore>>,
    /// Session holding the mailbox token
    session: Arc<MailboxSession>,
    /// Source of "now" for the recency window
    clock: Arc<dyn Clock>,
    /// Resolver configuration
    config: ResolverConfig,
}

impl VerificationCodeResolver {
    /// Create a resolver without stores, using the system clock
    ///
    /// # Arguments
    ///
    /// * `session` - Mailbox session shared with the login step
    /// * `config` - Resolver configuration
    pub fn new(session: Arc<MailboxSession>, config: ResolverConfig) -> Self {
        Self {
            message_store: None,
            sms_store: None,
            session,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Attach the mailbox store used for email targets
    pub fn with_message_store(mut self, store: Arc<dyn MessageStore>) -> Self {
        self.message_store = Some(store);
        self
    }

    /// Attach the SMS store used for phone targets
    pub fn with_sms_store(mut self, store: Arc<dyn SmsStore>) -> Self {
        self.sms_store = Some(store);
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Resolve the verification code for a target
    ///
    /// The recency cutoff is `now - window`, taken from the clock once per
    /// call. Codes are never cached between calls.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationCode)` - The six-digit code
    /// * `Err(ResolveError)` - Which stage failed, for which target
    pub async fn resolve(&self, target: &VerificationTarget) -> ResolveResult<VerificationCode> {
        tracing::info!(
            channel = %target.channel(),
            identity = %target,
            window_minutes = self.window_minutes(),
            "Resolving verification code"
        );

        let result = match target {
            VerificationTarget::Email(sender) => self.resolve_email(sender).await,
            VerificationTarget::Phone(phone) => self.resolve_phone(phone).await,
        };

        if let Err(e) = &result {
            tracing::error!(
                channel = %target.channel(),
                identity = %target,
                error = %e,
                "Verification code resolution failed"
            );
        }
        result
    }

    /// Resolve a code mailed by `sender` to the session's inbox
    pub async fn resolve_email(&self, sender: &SenderFilter) -> ResolveResult<VerificationCode> {
        let target = sender.to_string();
        let store = self.message_store.as_ref().ok_or_else(|| ResolveError::Configuration {
            message: "no mailbox store configured for the email channel".to_string(),
        })?;
        let token = self.session.token().await.ok_or(AuthError::NotLoggedIn)?;
        let cutoff = self.cutoff()?;

        // Fetch
        let mut messages = store
            .list_messages(&token)
            .await
            .map_err(|e| self.store_failure(ResolveStage::Fetch, &target, e))?;
        tracing::debug!(count = messages.len(), "Fetched inbox messages");

        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // Filter
        let mut matched = self.filter_inbox(&messages, sender, cutoff, &target).await?;
        if matched.is_empty() {
            tracing::warn!(
                identity = %target,
                cutoff = %cutoff,
                "No matching emails found in the recency window"
            );
            return Err(self.not_found(ResolveStage::Filter, &target));
        }

        matched.sort_by(|a, b| b.0.cmp(&a.0));
        let newest = matched
            .first()
            .map(|(_, message)| *message)
            .ok_or_else(|| self.not_found(ResolveStage::Filter, &target))?;
        tracing::info!(message_id = %newest.id, "Verification email found");

        // Extract
        let content = store
            .get_message(&token, &newest.id)
            .await
            .map_err(|e| self.store_failure(ResolveStage::Extract, &target, e))?;

        let code = VerificationCode::extract(&content.text)
            .ok_or_else(|| self.not_found(ResolveStage::Extract, &target))?;
        tracing::info!(message_id = %newest.id, "Verification code extracted from email");
        Ok(code)
    }

    /// Resolve a code texted to `phone`
    pub async fn resolve_phone(&self, phone: &PhoneTarget) -> ResolveResult<VerificationCode> {
        let target = phone.to_string();
        let store = self.sms_store.as_ref().ok_or_else(|| ResolveError::Configuration {
            message: "no SMS store configured for the phone channel (check TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and the startup log)"
                .to_string(),
        })?;

        let query = SmsQuery {
            to: phone.destination(),
            date_sent_after: self.cutoff()?,
            limit: self.config.sms_limit,
        };

        let messages = store
            .list_messages(&query)
            .await
            .map_err(|e| self.store_failure(ResolveStage::Fetch, &target, e))?;
        tracing::debug!(
            provider = store.provider_name(),
            count = messages.len(),
            "Fetched SMS messages"
        );

        if messages.is_empty() {
            return Err(self.not_found(ResolveStage::Fetch, &target));
        }

        for (position, message) in messages.iter().take(self.config.sms_limit as usize).enumerate() {
            if let Some(code) = VerificationCode::extract(&message.body) {
                tracing::info!(
                    provider = store.provider_name(),
                    position = position + 1,
                    "Verification code extracted from SMS"
                );
                return Ok(code);
            }
            tracing::debug!(position = position + 1, "SMS carries no verification code");
        }

        Err(self.not_found(ResolveStage::Extract, &target))
    }

    /// Check and filter sorted inbox messages.
    ///
    /// A message missing a required field aborts the whole pass; it is never
    /// skipped.
    async fn filter_inbox<'a>(
        &self,
        messages: &'a [InboxMessage],
        sender: &SenderFilter,
        cutoff: DateTime<Utc>,
        target: &str,
    ) -> ResolveResult<Vec<(DateTime<Utc>, &'a InboxMessage)>> {
        let mut matched = Vec::new();

        for message in messages {
            if !self.config.pacing.is_zero() {
                tokio::time::sleep(self.config.pacing).await;
            }

            let (created_at, from) = message
                .required_fields()
                .map_err(|field| self.malformed(message, field, target))?;

            if created_at <= cutoff {
                continue;
            }

            let (name, address) = from
                .identity()
                .map_err(|field| self.malformed(message, field, target))?;

            if sender.matches(name, address) {
                tracing::debug!(message_id = %message.id, "Candidate email from expected sender");
                matched.push((created_at, message));
            }
        }

        Ok(matched)
    }

    /// `now - window`; a window reaching past the representable range is a
    /// configuration error
    fn cutoff(&self) -> ResolveResult<DateTime<Utc>> {
        let now = self.clock.now();
        now.checked_sub_signed(self.config.window)
            .ok_or_else(|| ResolveError::Configuration {
                message: format!(
                    "verification window of {} minutes reaches before the earliest representable time",
                    self.window_minutes()
                ),
            })
    }

    fn window_minutes(&self) -> i64 {
        self.config.window.num_minutes()
    }

    fn not_found(&self, stage: ResolveStage, target: &str) -> ResolveError {
        ResolveError::NotFound {
            stage,
            target: target.to_string(),
            window_minutes: self.window_minutes(),
        }
    }

    fn malformed(&self, message: &InboxMessage, field: &'static str, target: &str) -> ResolveError {
        ResolveError::MalformedMessage {
            message_id: message.id.clone(),
            field,
            target: target.to_string(),
            window_minutes: self.window_minutes(),
        }
    }

    fn store_failure(&self, stage: ResolveStage, target: &str, error: StoreError) -> ResolveError {
        match error {
            StoreError::Configuration { message } => ResolveError::Configuration { message },
            source => ResolveError::ExternalService {
                stage,
                target: target.to_string(),
                window_minutes: self.window_minutes(),
                source,
            },
        }
    }
}
