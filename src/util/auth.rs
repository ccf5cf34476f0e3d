//! Auth flows shared by the login and dashboard pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each flow is one user-visible action: it runs the API call(s) and reduces
//! the result to what the page must do next (show a message, or navigate).
//! Pages apply the outcome to their signals; nothing here touches the DOM.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::api::AuthClient;
use crate::net::transport::Transport;
use crate::net::types::{Credentials, User};
use crate::route::AppRoute;

/// Shown when the identity query fails for any reason other than 401.
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error";

/// Result of a login attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The server answered 200 and the session cookie is set.
    Authenticated,
    /// A 2xx other than 200: the server accepted the request without
    /// confirming a session.
    Unconfirmed(u16),
    /// Anything else, with the message to show in the form.
    Rejected(String),
}

/// Run the two-step handshake and classify the result.
pub async fn run_login<T: Transport>(client: &AuthClient<T>, credentials: &Credentials) -> LoginOutcome {
    match client.login(credentials).await {
        Ok(200) => {
            log::info!("login succeeded for {}", credentials.email);
            LoginOutcome::Authenticated
        }
        Ok(status) => {
            log::warn!("login answered {status}; staying on the login page");
            LoginOutcome::Unconfirmed(status)
        }
        Err(e) => {
            log::error!("login failed: {e}");
            LoginOutcome::Rejected(e.user_message())
        }
    }
}

/// Result of the dashboard's identity query.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionCheck {
    Authenticated(User),
    /// The server answered 401.
    Unauthenticated,
    /// Any other failure, with the message to show.
    Unavailable(String),
}

/// Ask the server who owns the current session.
pub async fn check_session<T: Transport>(client: &AuthClient<T>) -> SessionCheck {
    match client.current_user().await {
        Ok(user) => SessionCheck::Authenticated(user),
        Err(e) if e.is_unauthorized() => {
            log::info!("no active session");
            SessionCheck::Unauthenticated
        }
        Err(e) => {
            log::error!("identity query failed: {e}");
            SessionCheck::Unavailable(CONNECTION_ERROR_MESSAGE.to_owned())
        }
    }
}

/// Log out, then always hand back the login route.
///
/// A failed logout is only logged: the UI treats the user as signed out
/// once they asked to be.
pub async fn sign_out<T: Transport>(client: &AuthClient<T>) -> AppRoute {
    if let Err(e) = client.logout().await {
        log::warn!("logout failed, redirecting anyway: {e}");
    }
    AppRoute::Login
}
