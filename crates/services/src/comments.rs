//! # CommentThread
//!
//! Comments for one post: the provider's list plus comments posted locally
//! during this session. Posting is gated, takes a fixed delay, and appends
//! the new comment at the end of the list.

use std::time::Duration;

use domains::{Comment, CommentId, PostId, QueryState};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::gate::{AuthGate, GateSignal};

pub const DEFAULT_COMMENT_DELAY: Duration = Duration::from_millis(500);

/// Static text shown instead of any provider error.
pub const COMMENTS_LOAD_FAILED: &str = "Failed to load comments";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostRejected {
    #[error("comment body is empty")]
    EmptyBody,
    #[error("a comment is already being posted")]
    AlreadySubmitting,
    #[error("sign in to comment")]
    Blocked(GateSignal),
}

/// A comment accepted for posting, waiting out the submit delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComment {
    pub post_id: PostId,
    pub author_email: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct CommentThread {
    post_id: PostId,
    comments: Vec<Comment>,
    is_loading: bool,
    error: Option<&'static str>,
    is_submitting: bool,
}

impl CommentThread {
    pub fn new(post_id: PostId) -> Self {
        Self {
            post_id,
            comments: Vec::new(),
            is_loading: true,
            error: None,
            is_submitting: false,
        }
    }

    /// Mirrors the provider state. Delivered data replaces the whole list,
    /// including anything posted locally.
    pub fn sync_source(&mut self, source: &QueryState<Vec<Comment>>) {
        self.is_loading = source.is_loading;
        self.error = source.error.as_ref().map(|_| COMMENTS_LOAD_FAILED);
        if let Some(comments) = &source.data {
            self.comments = comments.clone();
        }
    }

    pub fn begin_post(&mut self, draft: &str, gate: &AuthGate) -> Result<PendingComment, PostRejected> {
        let body = draft.trim();
        if body.is_empty() {
            return Err(PostRejected::EmptyBody);
        }
        if self.is_submitting {
            return Err(PostRejected::AlreadySubmitting);
        }

        gate.guard(
            self,
            |thread| {
                let Some(author_email) = gate.session().current_user_email() else {
                    return Err(PostRejected::Blocked(GateSignal::AuthenticationRequired));
                };
                thread.is_submitting = true;
                Ok(PendingComment {
                    post_id: thread.post_id,
                    author_email,
                    body: body.to_string(),
                })
            },
            |_, signal| Err(PostRejected::Blocked(signal)),
        )
    }

    /// Appends the pending comment. Returns `None` if the completion no longer
    /// belongs to this thread's in-flight post.
    pub fn complete_post(&mut self, pending: PendingComment) -> Option<Comment> {
        if pending.post_id != self.post_id || !self.is_submitting {
            debug!(post_id = pending.post_id, "discarding stale comment completion");
            return None;
        }

        let comment = Comment {
            id: self.next_id(),
            post_id: pending.post_id,
            name: pending.author_email.clone(),
            email: pending.author_email,
            body: pending.body,
        };
        self.comments.push(comment.clone());
        self.is_submitting = false;
        info!(post_id = comment.post_id, id = comment.id, "comment posted");
        Some(comment)
    }

    /// Gate check, submit delay and append as one flow. The lock is released
    /// during the delay so readers see `is_submitting`.
    pub async fn submit(
        thread: &Mutex<CommentThread>,
        draft: &str,
        gate: &AuthGate,
        delay: Duration,
    ) -> Result<Option<Comment>, PostRejected> {
        let pending = thread.lock().await.begin_post(draft, gate)?;
        tokio::time::sleep(delay).await;
        Ok(thread.lock().await.complete_post(pending))
    }

    fn next_id(&self) -> CommentId {
        self.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }
}
