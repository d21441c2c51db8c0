//! Rocket.Chat REST credentials.

use std::fmt;

/// Personal access or session token with masking.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    value: String,
}

impl AuthToken {
    const MIN_TOKEN_LENGTH: usize = 16;

    /// Creates new token with format validation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.len() < Self::MIN_TOKEN_LENGTH {
            return None;
        }

        if value.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self { value })
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.value.len() <= 10 {
            return "*".repeat(self.value.len());
        }

        let visible_prefix = &self.value[..4];
        let visible_suffix = &self.value[self.value.len() - 4..];
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

/// User id and token pair sent as `X-User-Id` / `X-Auth-Token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Id of the authenticated user.
    pub user_id: String,
    /// Auth token for that user.
    pub token: AuthToken,
}

impl Credentials {
    #[must_use]
    pub fn new(user_id: impl Into<String>, token: AuthToken) -> Self {
        Self {
            user_id: user_id.into(),
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_valid_token() -> String {
        "9HqLlyZOugoStsXCUfD_0YdwnNnunAJF8V47U3QHXSq".to_string()
    }

    #[test]
    fn test_valid_token_creation() {
        assert!(AuthToken::new(make_valid_token()).is_some());
        assert!(AuthToken::new(format!("  {}\n", make_valid_token())).is_some());
    }

    #[test]
    fn test_invalid_token_too_short() {
        assert!(AuthToken::new("short").is_none());
    }

    #[test]
    fn test_invalid_token_inner_whitespace() {
        assert!(AuthToken::new("abcdefgh ijklmnopqrs").is_none());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = AuthToken::new(make_valid_token()).unwrap();
        let credentials = Credentials::new("u1", token);
        let debug_output = format!("{credentials:?}");

        assert!(!debug_output.contains(&make_valid_token()));
        assert!(debug_output.contains("9HqL...HXSq"));
    }
}
