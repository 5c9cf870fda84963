//! # ServiceError
//!
//! Failures of the service plumbing itself. Domain outcomes (rejected login,
//! blocked action) are ordinary return values, not errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The feed task is gone; its handle can no longer deliver commands.
    #[error("feed runtime has stopped")]
    FeedStopped,
}
