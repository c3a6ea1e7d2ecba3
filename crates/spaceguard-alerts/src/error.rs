//! Error types for the spaceguard-alerts crate.
//!
//! User-facing command failures are plain message strings (see
//! [`crate::messages`]); these errors cover the programmatic seams only.

use thiserror::Error;

/// Errors that can occur in the alert configuration layer.
#[derive(Debug, Error)]
pub enum AlertError {
    /// A command token did not name a known alert kind or target.
    #[error("unknown alert token: {token}")]
    UnknownToken {
        /// The token that failed to parse.
        token: String,
    },

    /// Serialization/deserialization of the persisted context failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for alert configuration operations.
pub type Result<T> = std::result::Result<T, AlertError>;
