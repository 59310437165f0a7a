//! Stock code (SKU) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`StockCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum StockCodeError {
    /// The input string is empty (or only whitespace).
    #[error("stock code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("stock code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// An externally meaningful, unique product identifier (SKU).
///
/// Stock codes come from supplier feeds and admin forms, so parsing trims
/// surrounding whitespace. Uniqueness is enforced by the database, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StockCode(String);

impl StockCode {
    /// Maximum length of a stock code.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `StockCode` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`Self::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, StockCodeError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(StockCodeError::Empty);
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(StockCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the stock code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `StockCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StockCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for StockCode {
    type Err = StockCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for StockCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let code = StockCode::parse("  NAIL-001 ").expect("valid code");
        assert_eq!(code.as_str(), "NAIL-001");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(StockCode::parse(""), Err(StockCodeError::Empty)));
        assert!(matches!(StockCode::parse("   "), Err(StockCodeError::Empty)));
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "x".repeat(65);
        assert!(matches!(
            StockCode::parse(&long),
            Err(StockCodeError::TooLong { .. })
        ));
    }
}
