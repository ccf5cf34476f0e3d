//! Error type shared by the transports and the auth client.
//!
//! ERROR HANDLING
//! ==============
//! Pages never show raw transport errors. They go through
//! [`ApiError::user_message`], which keeps the server's own `message` when
//! one was sent and otherwise falls back to status or connectivity text.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message shown when a request never got an answer.
pub const NO_RESPONSE_MESSAGE: &str = "Connection error: no response from server";

/// Errors produced by auth API operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        status_text: String,
        /// `message` field of a JSON error body, if the server sent one.
        message: Option<String>,
    },

    /// The request was sent but no response arrived.
    #[error("no response from server: {0}")]
    NoResponse(String),

    /// The request could not be built or dispatched.
    #[error("request failed: {0}")]
    Request(String),

    /// A success response carried a body that could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The client configuration is unusable (e.g. malformed base URL).
    #[error("invalid client config: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of the failed response, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the request as unauthenticated.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text suitable for inline display next to a form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message: Some(message), .. } => message.clone(),
            Self::Status { status, status_text, message: None } => format!("Error {status}: {status_text}"),
            Self::NoResponse(_) => NO_RESPONSE_MESSAGE.to_owned(),
            Self::Request(detail) | Self::Decode(detail) | Self::Config(detail) => {
                format!("Connection error: {detail}")
            }
        }
    }
}
