//! # AuthGate
//!
//! Synchronous check-then-branch policy in front of feed reveal-more and
//! comment posting. Blocked actions are dropped, never queued.

use std::sync::Arc;

use tracing::info;

use crate::session::SessionStore;

/// Boundary signal consumed by the presentation layer to show a sign-in prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSignal {
    AuthenticationRequired,
}

#[derive(Clone)]
pub struct AuthGate {
    session: Arc<SessionStore>,
}

impl AuthGate {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// Runs `action` when the session is authenticated, otherwise `on_blocked`.
    /// Exactly one of the two runs. `ctx` is handed to whichever one runs so
    /// both branches may borrow the same caller state mutably.
    pub fn guard<C, T>(
        &self,
        ctx: C,
        action: impl FnOnce(C) -> T,
        on_blocked: impl FnOnce(C, GateSignal) -> T,
    ) -> T {
        match self.check() {
            Ok(()) => action(ctx),
            Err(signal) => on_blocked(ctx, signal),
        }
    }

    pub fn check(&self) -> Result<(), GateSignal> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            info!("action blocked: authentication required");
            Err(GateSignal::AuthenticationRequired)
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }
}
