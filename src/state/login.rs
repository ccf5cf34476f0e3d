//! Login form state machine.
//!
//! `Idle -> Submitting -> {navigate away | Failed}`; a failed form is usable
//! again straight away.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::net::types::Credentials;
use crate::route::AppRoute;
use crate::util::auth::LoginOutcome;

/// Development account pre-filled into the form.
pub const DEV_EMAIL: &str = "test@example.com";
pub const DEV_PASSWORD: &str = "password";

pub const MISSING_FIELDS_MESSAGE: &str = "Enter both email and password.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoginPhase {
    #[default]
    Idle,
    Submitting,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub phase: LoginPhase,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            email: DEV_EMAIL.to_owned(),
            password: DEV_PASSWORD.to_owned(),
            phase: LoginPhase::Idle,
        }
    }
}

impl LoginState {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == LoginPhase::Submitting
    }

    /// Message to render under the form, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoginPhase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() { "Loading..." } else { "Sign in" }
    }

    /// Move to `Submitting` and hand back the trimmed credentials.
    ///
    /// Returns `None` when a submission is already in flight, or when a
    /// field is empty (the form then shows [`MISSING_FIELDS_MESSAGE`]).
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.is_submitting() {
            return None;
        }
        match validate_credentials(&self.email, &self.password) {
            Ok(credentials) => {
                self.phase = LoginPhase::Submitting;
                Some(credentials)
            }
            Err(message) => {
                self.phase = LoginPhase::Failed(message.to_owned());
                None
            }
        }
    }

    /// Apply a finished attempt; returns where to navigate, if anywhere.
    pub fn finish(&mut self, outcome: LoginOutcome) -> Option<AppRoute> {
        match outcome {
            LoginOutcome::Authenticated => {
                self.phase = LoginPhase::Idle;
                Some(AppRoute::Dashboard)
            }
            LoginOutcome::Unconfirmed(_) => {
                self.phase = LoginPhase::Idle;
                None
            }
            LoginOutcome::Rejected(message) => {
                self.phase = LoginPhase::Failed(message);
                None
            }
        }
    }
}

/// Trim both fields and require them to be non-empty.
///
/// # Errors
///
/// Returns [`MISSING_FIELDS_MESSAGE`] if either field is blank.
pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let credentials = Credentials::trimmed(email, password);
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok(credentials)
}
