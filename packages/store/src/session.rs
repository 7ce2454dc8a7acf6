//! # Session guard
//!
//! The browser holds the session as an opaque cookie, so the only way to know
//! whether it is still valid is to ask. [`SessionGuard::check`] issues one request
//! (`GET /api/patient`) and turns the answer into a [`GuardOutcome`]:
//!
//! - any 2xx (including `204 No Content`) yields [`GuardOutcome::Authenticated`]
//!   carrying a [`Session`];
//! - every failure, 401 or otherwise, yields [`GuardOutcome::Redirect`].
//!
//! A [`Session`] can only be obtained from a successful check. Protected
//! controllers take one in their constructor, which makes "render only after
//! the guard passed" a type-level fact rather than a convention.

use crate::backend::Backend;

/// Proof that the session cookie was accepted at activation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    _private: (),
}

impl Session {
    pub(crate) fn verified() -> Self {
        Self { _private: () }
    }
}

/// Result of a guard activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Authenticated(Session),
    /// Send the user to the login view and render nothing.
    Redirect,
}

impl GuardOutcome {
    pub fn session(&self) -> Option<&Session> {
        match self {
            GuardOutcome::Authenticated(session) => Some(session),
            GuardOutcome::Redirect => None,
        }
    }
}

/// Gates protected views behind a session check.
pub struct SessionGuard<B> {
    backend: B,
}

impl<B: Backend> SessionGuard<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Check the API once. Repeated calls check again.
    pub async fn check(&self) -> GuardOutcome {
        match self.backend.check_session().await {
            Ok(()) => GuardOutcome::Authenticated(Session::verified()),
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("session check returned 401, redirecting to login");
                GuardOutcome::Redirect
            }
            Err(e) => {
                tracing::error!("session check failed: {e}");
                GuardOutcome::Redirect
            }
        }
    }
}
