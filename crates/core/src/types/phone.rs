//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character other than an ASCII digit.
    #[error("phone number must contain only digits")]
    NonDigit,
    /// The input is not exactly ten digits long.
    #[error("phone number must be exactly {expected} digits")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
    /// The input does not start with a zero.
    #[error("phone number must start with 0")]
    MissingLeadingZero,
}

/// A national phone number.
///
/// Account lookups key on the phone number, so it is validated once at the
/// edge and passed around as an already-checked value.
///
/// ## Constraints
///
/// - Exactly 10 ASCII digits
/// - Starts with `0`
///
/// ## Examples
///
/// ```
/// use pocketwave_core::Phone;
///
/// // Valid numbers
/// assert!(Phone::parse("0912345678").is_ok());
/// assert!(Phone::parse("0000000000").is_ok());
///
/// // Invalid numbers
/// assert!(Phone::parse("").is_err());            // empty
/// assert!(Phone::parse("091234567").is_err());   // too short
/// assert!(Phone::parse("9123456780").is_err());  // wrong leading digit
/// assert!(Phone::parse("09123 5678").is_err());  // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a valid phone number.
    pub const LENGTH: usize = 10;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Contains a non-digit character
    /// - Is not exactly ten digits
    /// - Does not start with `0`
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        if s.len() != Self::LENGTH {
            return Err(PhoneError::WrongLength {
                expected: Self::LENGTH,
            });
        }

        if !s.starts_with('0') {
            return Err(PhoneError::MissingLeadingZero);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
