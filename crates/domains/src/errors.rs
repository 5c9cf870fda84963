//! # Errors
//!
//! Failure types shared across the port boundary.

use thiserror::Error;

/// Failures reported by a [`crate::ContentProvider`].
///
/// These are opaque to the consuming controllers: they only decide whether
/// to halt, and always show their own static message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The body was not the JSON shape we expected.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The request was blocked before leaving the client.
    #[error("User is not authenticated. Request blocked.")]
    Unauthenticated,
}

/// Failures reported by a [`crate::KeyValueStore`].
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("storage lock poisoned during {0}")]
    LockPoisoned(&'static str),
}
