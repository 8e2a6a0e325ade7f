//! Verification delivery channel and the scenario-text mapping table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Channel a verification code is delivered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Code mailed to the account address
    Email,
    /// Code texted to the account phone number
    Phone,
}

/// Login-type labels used by the scenarios, mapped onto channels.
///
/// The first label listed for a channel is the one the login page shows.
const LOGIN_TYPE_TABLE: &[(&str, Channel)] = &[
    ("電子信箱", Channel::Email),
    ("手機驗證", Channel::Phone),
    ("email", Channel::Email),
    ("mail", Channel::Email),
    ("phone", Channel::Phone),
    ("sms", Channel::Phone),
];

impl Channel {
    /// Look up the channel for a login-type label from scenario text
    pub fn from_login_type(login_type: &str) -> Result<Self, ValidationError> {
        let wanted = login_type.trim();
        LOGIN_TYPE_TABLE
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(wanted))
            .map(|(_, channel)| *channel)
            .ok_or_else(|| ValidationError::UnknownLoginType {
                login_type: wanted.to_string(),
            })
    }

    /// Label shown on the login page for this channel
    pub fn login_label(&self) -> &'static str {
        LOGIN_TYPE_TABLE
            .iter()
            .find(|(_, channel)| channel == self)
            .map(|(label, _)| *label)
            .unwrap_or_default()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::Phone => write!(f, "phone"),
        }
    }
}

impl FromStr for Channel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_login_type(s)
    }
}
