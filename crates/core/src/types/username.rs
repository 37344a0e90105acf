//! Account name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UsernameError {
    /// The input string is empty (or whitespace only).
    #[error("name cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains control characters.
    #[error("name cannot contain control characters")]
    ControlCharacters,
}

/// A user account name.
///
/// Names are unique per user and double as the login identifier. Parsing
/// trims surrounding whitespace and rejects empty or unprintable input.
///
/// ## Constraints
///
/// - Length: 1-64 characters after trimming
/// - No control characters
///
/// ## Examples
///
/// ```
/// use stockline_core::Username;
///
/// assert!(Username::parse("alice").is_ok());
/// assert!(Username::parse("  bob  ").is_ok()); // trimmed to "bob"
///
/// assert!(Username::parse("").is_err());       // empty
/// assert!(Username::parse("   ").is_err());    // whitespace only
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum length of a username.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input (after trimming):
    /// - Is empty
    /// - Is longer than 64 characters
    /// - Contains control characters
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UsernameError::ControlCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let name = Username::parse("  alice  ").expect("valid name");
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(Username::parse(""), Err(UsernameError::Empty)));
        assert!(matches!(Username::parse("   "), Err(UsernameError::Empty)));
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = "a".repeat(Username::MAX_LENGTH + 1);
        assert!(matches!(
            Username::parse(&long),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_control_characters() {
        assert!(matches!(
            Username::parse("al\nice"),
            Err(UsernameError::ControlCharacters)
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let name = Username::parse("alice").expect("valid name");
        assert_eq!(serde_json::to_string(&name).expect("serialize"), "\"alice\"");

        let back: Username = serde_json::from_str("\"bob\"").expect("deserialize");
        assert_eq!(back.as_str(), "bob");
    }
}
