//! # AuthInterceptor
//!
//! Wraps a provider and rejects gated requests while the session is
//! anonymous. The check happens at call time; nothing is queued.

use std::sync::Arc;

use async_trait::async_trait;
use domains::{Comment, ContentProvider, Post, PostId, ProviderError, User};
use services::SessionStore;
use tracing::info;

pub struct AuthInterceptor<P> {
    inner: P,
    session: Arc<SessionStore>,
}

impl<P> AuthInterceptor<P> {
    pub fn new(inner: P, session: Arc<SessionStore>) -> Self {
        Self { inner, session }
    }

    fn authorize(&self, request: &str) -> Result<(), ProviderError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            info!(request, "request blocked for anonymous session");
            Err(ProviderError::Unauthenticated)
        }
    }
}

#[async_trait]
impl<P: ContentProvider> ContentProvider for AuthInterceptor<P> {
    /// The post list feeds the public home page and is never gated.
    async fn fetch_posts(&self) -> Result<Vec<Post>, ProviderError> {
        self.inner.fetch_posts().await
    }

    async fn fetch_post(&self, id: PostId) -> Result<Post, ProviderError> {
        self.authorize("post")?;
        self.inner.fetch_post(id).await
    }

    async fn fetch_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ProviderError> {
        self.authorize("comments")?;
        self.inner.fetch_comments(post_id).await
    }

    async fn fetch_users(&self) -> Result<Vec<User>, ProviderError> {
        self.authorize("users")?;
        self.inner.fetch_users().await
    }
}
