//! # SessionStore
//!
//! Mock authentication state machine: `Anonymous` <-> `Authenticated(email)`,
//! with a login error overlay attached to the most recent failed attempt.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::directory::UserDirectory;
use crate::store::{Reducer, Store};

/// The only message a failed login ever shows.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    Authenticated {
        email: String,
    },
}

/// `is_authenticated() == current_user_email().is_some()` holds by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub status: AuthStatus,
    pub error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, AuthStatus::Authenticated { .. })
    }

    pub fn current_user_email(&self) -> Option<&str> {
        match &self.status {
            AuthStatus::Authenticated { email } => Some(email),
            AuthStatus::Anonymous => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug)]
pub enum SessionEvent {
    LoggedIn { email: String },
    LoginRejected,
    LoggedOut,
    LoginErrorCleared,
}

impl Reducer for SessionState {
    type Event = SessionEvent;

    fn reduce(&self, event: &SessionEvent) -> Self {
        match event {
            SessionEvent::LoggedIn { email } => SessionState {
                status: AuthStatus::Authenticated {
                    email: email.clone(),
                },
                error: None,
            },
            SessionEvent::LoginRejected => SessionState {
                status: AuthStatus::Anonymous,
                error: Some(INVALID_CREDENTIALS.to_string()),
            },
            SessionEvent::LoggedOut => SessionState::default(),
            SessionEvent::LoginErrorCleared => SessionState {
                status: self.status.clone(),
                error: None,
            },
        }
    }
}

/// Everything a caller may ask of the session.
#[derive(Debug)]
pub enum SessionAction<'a> {
    Login { email: &'a str, password: &'a str },
    Logout,
    ClearLoginError,
}

pub struct SessionStore {
    directory: Arc<UserDirectory>,
    store: Store<SessionState>,
}

impl SessionStore {
    pub fn new(directory: Arc<UserDirectory>) -> Self {
        Self {
            directory,
            store: Store::new(SessionState::default()),
        }
    }

    /// Single entry point for every transition. Returns whether the session
    /// is authenticated once the action has been applied.
    pub fn dispatch(&self, action: SessionAction<'_>) -> bool {
        let event = match action {
            SessionAction::Login { email, password } => {
                if self.directory.validate_user(email, password) {
                    debug!(%email, "login accepted");
                    SessionEvent::LoggedIn {
                        email: email.to_string(),
                    }
                } else {
                    info!(%email, "login rejected");
                    SessionEvent::LoginRejected
                }
            }
            SessionAction::Logout => SessionEvent::LoggedOut,
            SessionAction::ClearLoginError => SessionEvent::LoginErrorCleared,
        };
        self.store.apply(event).is_authenticated()
    }

    pub fn login(&self, email: &str, password: &str) -> bool {
        self.dispatch(SessionAction::Login { email, password })
    }

    pub fn logout(&self) {
        self.dispatch(SessionAction::Logout);
    }

    pub fn clear_login_error(&self) {
        self.dispatch(SessionAction::ClearLoginError);
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.read(SessionState::is_authenticated)
    }

    pub fn current_user_email(&self) -> Option<String> {
        self.store
            .read(|state| state.current_user_email().map(str::to_owned))
    }

    pub fn snapshot(&self) -> SessionState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    pub fn directory(&self) -> &Arc<UserDirectory> {
        &self.directory
    }
}
