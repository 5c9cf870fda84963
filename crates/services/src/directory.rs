//! # UserDirectory
//!
//! In-memory set of known credentials. Registration never rejects: duplicate
//! emails may coexist and lookups return the first match in insertion order.

use domains::Credential;
use tracing::debug;

use crate::store::{Reducer, Store};

pub const SEEDED_EMAIL: &str = "test123@gmail.com";
pub const SEEDED_PASSWORD: &str = "123456";

/// Snapshot of every registered credential, in insertion order.
#[derive(Debug, Clone)]
pub struct Directory {
    users: Vec<Credential>,
}

impl Directory {
    pub fn users(&self) -> &[Credential] {
        &self.users
    }

    fn find(&self, email: &str) -> Option<&Credential> {
        self.users.iter().find(|user| user.email == email)
    }
}

#[derive(Debug)]
pub enum DirectoryEvent {
    UserAdded(Credential),
}

impl Reducer for Directory {
    type Event = DirectoryEvent;

    fn reduce(&self, event: &DirectoryEvent) -> Self {
        match event {
            DirectoryEvent::UserAdded(credential) => {
                let mut users = self.users.clone();
                users.push(credential.clone());
                Directory { users }
            }
        }
    }
}

pub struct UserDirectory {
    store: Store<Directory>,
}

impl UserDirectory {
    /// A directory holding exactly the seeded account.
    pub fn new() -> Self {
        Self::with_users(vec![Credential::new(SEEDED_EMAIL, SEEDED_PASSWORD)])
    }

    pub fn with_users(users: Vec<Credential>) -> Self {
        Self {
            store: Store::new(Directory { users }),
        }
    }

    /// Appends unconditionally. Always succeeds.
    pub fn add_user(&self, credential: Credential) -> bool {
        debug!(email = %credential.email, "registering user");
        self.store.apply(DirectoryEvent::UserAdded(credential));
        true
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<Credential> {
        self.store.read(|dir| dir.find(email).cloned())
    }

    pub fn validate_user(&self, email: &str, password: &str) -> bool {
        self.store.read(|dir| {
            dir.find(email)
                .map(|user| user.password_matches(password))
                .unwrap_or(false)
        })
    }

    pub fn len(&self) -> usize {
        self.store.read(|dir| dir.users.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Directory {
        self.store.snapshot()
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}
