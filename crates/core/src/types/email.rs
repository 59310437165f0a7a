//! Validated email address.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Longest address accepted, per RFC 5321.
const MAX_LEN: usize = 254;

/// Why a string was rejected as an email address.
#[derive(thiserror::Error, Debug, Clone)]
pub enum EmailError {
    /// Nothing to parse.
    #[error("address is empty")]
    Empty,
    /// Longer than the RFC 5321 limit.
    #[error("address exceeds {MAX_LEN} characters")]
    TooLong,
    /// No `@` separator.
    #[error("address has no @")]
    MissingAtSymbol,
    /// Nothing before the `@`.
    #[error("address has nothing before the @")]
    EmptyLocalPart,
    /// Nothing after the `@`.
    #[error("address has nothing after the @")]
    EmptyDomain,
}

/// An email address that passed structural validation.
///
/// Validation is deliberately shallow: a non-empty local part and domain
/// around a single `@`, within the RFC 5321 length limit. Deliverability
/// is not checked; the address is the login identifier, nothing more.
/// Surrounding whitespace from form input is trimmed before validation.
///
/// ```
/// use lakkeriet_core::Email;
///
/// assert!(Email::parse("kari@example.com").is_ok());
/// assert!(Email::parse("  kari@example.com ").is_ok());
/// assert!(Email::parse("kari.example.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate a string as an email address.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] naming the first structural problem found.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.len() > MAX_LEN {
            return Err(EmailError::TooLong);
        }

        let (local, domain) = trimmed.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
