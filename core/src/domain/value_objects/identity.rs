//! Identities used to pick the right message out of a shared inbox or number.

use lf_shared::phone::{is_valid_international_phone, join_destination, mask_phone_number};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::channel::Channel;
use crate::errors::ValidationError;

/// Sender whose mail counts as "the verification email".
///
/// An inbox may hold unrelated mail, so both the display name and the
/// address have to match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderFilter {
    pub sender_name: String,
    pub sender_address: String,
}

impl SenderFilter {
    pub fn new(sender_name: impl Into<String>, sender_address: impl Into<String>) -> Self {
        Self {
            sender_name: sender_name.into(),
            sender_address: sender_address.into(),
        }
    }

    /// Both name and address equal the filter's
    pub fn matches(&self, name: &str, address: &str) -> bool {
        self.sender_name == name && self.sender_address == address
    }
}

impl fmt::Display for SenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sender {} <{}>", self.sender_name, self.sender_address)
    }
}

/// Phone number whose text messages are read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneTarget {
    pub region_code: String,
    pub phone_number: String,
}

impl PhoneTarget {
    /// Create a target from scenario text; both parts are trimmed and required
    pub fn new(region_code: &str, phone_number: &str) -> Result<Self, ValidationError> {
        let region_code = region_code.trim();
        let phone_number = phone_number.trim();
        if region_code.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "region_code".to_string(),
            });
        }
        if phone_number.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "phone_number".to_string(),
            });
        }

        let target = Self {
            region_code: region_code.to_string(),
            phone_number: phone_number.to_string(),
        };
        if !is_valid_international_phone(&target.destination()) {
            tracing::warn!(
                destination = %mask_phone_number(&target.destination()),
                "Destination is not an E.164 number, provider lookups may come back empty"
            );
        }
        Ok(target)
    }

    /// Region code and number concatenated without separator
    pub fn destination(&self) -> String {
        join_destination(&self.region_code, &self.phone_number)
    }
}

impl fmt::Display for PhoneTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phone {}", mask_phone_number(&self.destination()))
    }
}

/// Channel plus the identity that selects the message on that channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationTarget {
    Email(SenderFilter),
    Phone(PhoneTarget),
}

impl VerificationTarget {
    pub fn channel(&self) -> Channel {
        match self {
            VerificationTarget::Email(_) => Channel::Email,
            VerificationTarget::Phone(_) => Channel::Phone,
        }
    }
}

impl fmt::Display for VerificationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationTarget::Email(sender) => fmt::Display::fmt(sender, f),
            VerificationTarget::Phone(phone) => fmt::Display::fmt(phone, f),
        }
    }
}

impl From<SenderFilter> for VerificationTarget {
    fn from(sender: SenderFilter) -> Self {
        VerificationTarget::Email(sender)
    }
}

impl From<PhoneTarget> for VerificationTarget {
    fn from(phone: PhoneTarget) -> Self {
        VerificationTarget::Phone(phone)
    }
}
