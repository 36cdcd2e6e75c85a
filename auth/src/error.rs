//! Authentication error types.

use thiserror::Error;

/// Authentication errors.
///
/// Every failure in this crate collapses into a single kind carrying the
/// provider's human-readable message. The reducer surfaces that text
/// verbatim as form feedback, so no variant taxonomy is needed here.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The hosted provider rejected or failed an operation.
    #[error("{message}")]
    Provider {
        /// Human-readable message, suitable for direct display.
        message: String,
    },
}

impl AuthError {
    /// Create a provider error from any displayable message.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// The displayable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Provider { message } => message,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::provider(error.to_string())
    }
}

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;
