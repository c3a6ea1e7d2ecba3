//! Error types for incident dispatch.

/// Errors raised when delivering an incident to the notification endpoint.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The HTTP request itself failed (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with something other than 200 OK.
    #[error("unexpected status {status} from notification endpoint")]
    UnexpectedStatus {
        /// The status code the endpoint returned.
        status: u16,
    },

    /// The endpoint answered 200 with an empty body, which it never does
    /// on successful ingestion.
    #[error("notification endpoint returned an empty body")]
    EmptyBody,
}

/// Result alias for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
