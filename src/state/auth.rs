//! Auth-session state for the dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Filled once per dashboard mount from the identity query. A 401 only
//! produces a redirect; no message is kept for a page that is about to
//! unmount.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;
use crate::route::AppRoute;
use crate::util::auth::SessionCheck;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// State while the identity query is outstanding.
    #[must_use]
    pub fn loading() -> Self {
        Self { loading: true, ..Self::default() }
    }

    /// Whether the protected view may render: only once an identity is held.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Apply the identity query result; returns where to navigate, if anywhere.
    pub fn apply(&mut self, check: SessionCheck) -> Option<AppRoute> {
        self.loading = false;
        match check {
            SessionCheck::Authenticated(user) => {
                self.user = Some(user);
                self.error = None;
                None
            }
            SessionCheck::Unauthenticated => {
                self.user = None;
                Some(AppRoute::Login)
            }
            SessionCheck::Unavailable(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}
