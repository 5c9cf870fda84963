//! Endpoint paths, always built as `{base_url}/{endpoint}`.

use std::fmt;

use domains::{PostId, UserId};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiEntity {
    Posts,
    Comments,
    Todos,
    Users,
}

impl ApiEntity {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiEntity::Posts => "posts",
            ApiEntity::Comments => "comments",
            ApiEntity::Todos => "todos",
            ApiEntity::Users => "users",
        }
    }
}

impl fmt::Display for ApiEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrls {
    base_url: String,
}

impl ApiUrls {
    /// A trailing slash on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    pub fn all_posts(&self) -> String {
        self.build(ApiEntity::Posts.as_str())
    }

    pub fn post(&self, id: PostId) -> String {
        self.build(&format!("{}/{id}", ApiEntity::Posts))
    }

    pub fn post_comments(&self, id: PostId) -> String {
        self.build(&format!("{}/{id}/{}", ApiEntity::Posts, ApiEntity::Comments))
    }

    pub fn all_users(&self) -> String {
        self.build(ApiEntity::Users.as_str())
    }

    pub fn user(&self, id: UserId) -> String {
        self.build(&format!("{}/{id}", ApiEntity::Users))
    }

    pub fn all_todos(&self) -> String {
        self.build(ApiEntity::Todos.as_str())
    }

    pub fn todo(&self, id: u64) -> String {
        self.build(&format!("{}/{id}", ApiEntity::Todos))
    }
}

impl Default for ApiUrls {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        let urls = ApiUrls::default();
        assert_eq!(urls.all_posts(), "https://jsonplaceholder.typicode.com/posts");
        assert_eq!(urls.post(3), "https://jsonplaceholder.typicode.com/posts/3");
        assert_eq!(urls.post_comments(3), "https://jsonplaceholder.typicode.com/posts/3/comments");
        assert_eq!(urls.all_users(), "https://jsonplaceholder.typicode.com/users");
        assert_eq!(urls.user(2), "https://jsonplaceholder.typicode.com/users/2");
        assert_eq!(urls.todo(9), "https://jsonplaceholder.typicode.com/todos/9");
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        assert_eq!(ApiUrls::new("http://local/").all_todos(), "http://local/todos");
    }
}
