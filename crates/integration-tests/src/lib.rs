//! Shared fixtures for the cross-crate tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use domains::{Comment, ContentProvider, Navigator, Post, PostId, ProviderError, User};
use services::feed::PostCollection;

/// The four-post collection used by the search scenarios.
pub fn scenario_posts() -> Vec<Post> {
    [(1, 1), (2, 2), (3, 1), (4, 3)]
        .into_iter()
        .map(|(id, user_id)| Post {
            id,
            user_id,
            title: format!("test{id}"),
            body: format!("body test{id}"),
        })
        .collect()
}

pub fn numbered_posts(count: u64) -> PostCollection {
    (1..=count)
        .map(|id| Post {
            id,
            user_id: id % 10 + 1,
            title: format!("post {id}"),
            body: format!("body of post {id}"),
        })
        .collect()
}

/// In-process backend with fixed content.
#[derive(Default)]
pub struct StaticProvider {
    pub posts: Vec<Post>,
    pub comments: HashMap<PostId, Vec<Comment>>,
    pub users: Vec<User>,
}

#[async_trait]
impl ContentProvider for StaticProvider {
    async fn fetch_posts(&self) -> Result<Vec<Post>, ProviderError> {
        Ok(self.posts.clone())
    }

    async fn fetch_post(&self, id: PostId) -> Result<Post, ProviderError> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ProviderError::Status {
                status: 404,
                url: format!("posts/{id}"),
            })
    }

    async fn fetch_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ProviderError> {
        Ok(self.comments.get(&post_id).cloned().unwrap_or_default())
    }

    async fn fetch_users(&self) -> Result<Vec<User>, ProviderError> {
        Ok(self.users.clone())
    }
}

/// Records every navigation as `push:/path` or `replace:/path`.
#[derive(Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    fn record(&self, entry: String) {
        if let Ok(mut history) = self.history.lock() {
            history.push(entry);
        }
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.record(format!("push:{path}"));
    }

    fn replace(&self, path: &str) {
        self.record(format!("replace:{path}"));
    }
}
