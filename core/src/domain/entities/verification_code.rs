//! Verification code value read back from a mail or SMS body.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::errors::ValidationError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

// Six ASCII digits not touching any other word character. `\b` stays
// Unicode-aware so a run glued to letters or non-ASCII digits is rejected.
static CODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[0-9]{6}\b").expect("valid verification code pattern")
});

/// A one-time code of exactly six decimal digits.
///
/// Derived fresh for every verification attempt and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Extract the first standalone run of six digits from a message body
    ///
    /// # Arguments
    ///
    /// * `text` - Plain-text body of a mail or SMS
    ///
    /// # Returns
    ///
    /// The code, or `None` when no run of exactly six digits is isolated by
    /// word boundaries
    pub fn extract(text: &str) -> Option<Self> {
        CODE_PATTERN
            .find(text)
            .map(|m| Self(m.as_str().to_string()))
    }

    /// Parse a code typed or passed in verbatim
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        if value.len() == CODE_LENGTH && value.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(ValidationError::InvalidCode {
                value: value.to_string(),
            })
        }
    }

    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual digits, in order
    pub fn digits(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    /// Digits laid out one per input box of a segmented code form.
    ///
    /// The login form renders one single-character input per digit, so the
    /// number of inputs found on the page must equal the code length.
    pub fn split_for_inputs(&self, input_count: usize) -> Result<Vec<char>, ValidationError> {
        if input_count != CODE_LENGTH {
            return Err(ValidationError::InputCountMismatch {
                inputs: input_count,
                expected: CODE_LENGTH,
            });
        }
        Ok(self.digits().collect())
    }

    /// Consume the code, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VerificationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for VerificationCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
