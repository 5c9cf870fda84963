//! # Ports
//!
//! Any adapter must implement these traits to be wired into the services.

use async_trait::async_trait;

use crate::errors::{ProviderError, StorageError};
use crate::models::{Comment, Post, PostId, User};

/// Read-only access to the remote content backend.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<Post>, ProviderError>;
    async fn fetch_post(&self, id: PostId) -> Result<Post, ProviderError>;
    async fn fetch_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ProviderError>;
    async fn fetch_users(&self) -> Result<Vec<User>, ProviderError>;
}

/// Small durable string store, shaped like browser local storage.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Routing capability owned by the presentation layer.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Adds a history entry.
    fn push(&self, path: &str);
    /// Replaces the current history entry.
    fn replace(&self, path: &str);
}
