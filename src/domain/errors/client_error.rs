//! Errors raised while talking to the chat server.

use thiserror::Error;

/// Chat server error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ClientError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("not authorized, check user id and auth token")]
    Unauthorized,

    #[error("request rejected by server: {message}")]
    Rejected { message: String },

    #[error("rate limited by server, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("invalid response from server: {message}")]
    InvalidResponse { message: String },

    #[error("unexpected client error: {message}")]
    Unexpected { message: String },
}

impl ClientError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_classification() {
        assert!(ClientError::network("down").is_network_error());
        assert!(ClientError::RateLimited { retry_after_ms: 10 }.is_network_error());
        assert!(!ClientError::Unauthorized.is_network_error());
        assert!(!ClientError::rejected("no").is_network_error());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ClientError::rejected("error-action-not-allowed").to_string(),
            "request rejected by server: error-action-not-allowed"
        );
    }
}
