//! Transport seam between the auth protocol and an HTTP stack.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build talks through `gloo-net` (see `browser`), native builds
//! and integration tests through `reqwest` (see `native`). Both must include
//! credentials on every request and expose the cookies page script can see,
//! which is where the anti-forgery token is read from.

use async_trait::async_trait;

use super::types::{HttpRequest, HttpResponse};
use crate::error::ApiError;

/// Executes prepared requests with credentials included.
///
/// Futures are `?Send`: browser fetch futures are tied to the JS thread.
#[async_trait(?Send)]
pub trait Transport {
    /// Send `request` and return whatever status the server answered with.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NoResponse`] when the server never answered and
    /// [`ApiError::Request`] when the request could not be sent at all.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;

    /// `name=value; ...` string of cookies readable by page script.
    fn document_cookies(&self) -> Option<String>;

    /// Store a cookie directive (`Set-Cookie` syntax), as `document.cookie = ...` does.
    fn write_cookie(&self, directive: &str);
}
