//! # Domain Models
//!
//! Records served by the content backend plus the mock credential type.
//! Field names follow the backend's camelCase wire format.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub type PostId = u64;
pub type UserId = u64;
pub type CommentId = u64;

/// A single feed entry. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

impl Post {
    /// There is no real author name; the handle is derived from the numeric id.
    pub fn username(&self) -> String {
        format!("user{}", self.user_id)
    }
}

/// A comment attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// A backend user profile. Unknown fields (address, company, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
}

/// An email/password pair known to the mock user directory.
///
/// The email is stored exactly as entered (case-sensitive, not normalized).
/// The password is plaintext but wrapped so it never shows up in `Debug` output.
#[derive(Debug, Clone)]
pub struct Credential {
    pub email: String,
    password: SecretString,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Exact, case-sensitive comparison against the stored password.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_deserializes_from_wire_format() {
        let post: Post = serde_json::from_str(
            r#"{"userId": 3, "id": 7, "title": "hello", "body": "world"}"#,
        )
        .unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.user_id, 3);
        assert_eq!(post.username(), "user3");
    }

    #[test]
    fn test_user_ignores_extra_fields() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "name": "Leanne", "username": "Bret", "email": "a@b.c",
                "address": {"city": "Gwenborough"}, "phone": "1-770"}"#,
        )
        .unwrap();
        assert_eq!(user.username, "Bret");
    }

    #[test]
    fn test_credential_password_is_exact_and_hidden() {
        let credential = Credential::new("test123@gmail.com", "123456");
        assert!(credential.password_matches("123456"));
        assert!(!credential.password_matches("123456 "));
        assert!(!format!("{credential:?}").contains("123456"));
    }
}
