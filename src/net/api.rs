//! REST client for the session-cookie authentication API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request goes through [`AuthClient::prepare`], which applies the one
//! shared policy: JSON accept headers, and the anti-forgery header whenever
//! the token cookie is visible. Credentials (cookies) are the transport's
//! job.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>`; pages decide how each error is shown.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use super::transport::Transport;
use super::types::{Credentials, HttpRequest, HttpResponse, Method, User};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::util::cookies;

/// Proof that the anti-forgery bootstrap completed.
///
/// Only [`AuthClient::csrf_cookie`] can produce one, and
/// [`AuthClient::submit_login`] consumes it, so credentials cannot be sent
/// before the token cookie exists.
#[derive(Debug)]
pub struct XsrfPrimed {
    _private: (),
}

/// Auth API client: immutable config plus a transport.
#[derive(Clone, Debug)]
pub struct AuthClient<T> {
    config: Arc<ClientConfig>,
    transport: T,
}

impl<T: Transport> AuthClient<T> {
    #[must_use]
    pub fn new(config: Arc<ClientConfig>, transport: T) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build a request for `path` with the shared header policy applied.
    #[must_use]
    pub fn prepare(&self, method: Method, path: &str) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.config.url(path))
            .with_header("Accept", "application/json")
            .with_header("X-Requested-With", "XMLHttpRequest");
        if let Some(token) = self.xsrf_token() {
            request = request.with_header(&self.config.xsrf_header_name, &token);
        }
        request
    }

    /// Current anti-forgery token, decoded from its cookie.
    #[must_use]
    pub fn xsrf_token(&self) -> Option<String> {
        let cookies = self.transport.document_cookies()?;
        cookies::read(&cookies, &self.config.xsrf_cookie_name)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("{} {}", request.method.as_str(), request.url);
        let resp = self.transport.send(request).await?;
        log::debug!("-> {} {}", resp.status, resp.status_text);
        resp.error_for_status()
    }

    /// `GET /sanctum/csrf-cookie`: have the server set the anti-forgery cookie.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or [`ApiError::Status`] on a non-2xx answer.
    pub async fn csrf_cookie(&self) -> Result<XsrfPrimed, ApiError> {
        let request = self.prepare(Method::Get, &self.config.endpoints.csrf_cookie);
        self.execute(request).await?;
        if self.xsrf_token().is_none() {
            log::warn!("bootstrap succeeded but no {} cookie is visible", self.config.xsrf_cookie_name);
        }
        Ok(XsrfPrimed { _private: () })
    }

    /// `POST /login` with the credentials. Returns the success status code.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or [`ApiError::Status`] on a non-2xx answer.
    pub async fn submit_login(&self, _primed: XsrfPrimed, credentials: &Credentials) -> Result<u16, ApiError> {
        let body = serde_json::to_value(credentials).map_err(|e| ApiError::Request(e.to_string()))?;
        let request = self.prepare(Method::Post, &self.config.endpoints.login).with_json(body);
        let resp = self.execute(request).await?;
        Ok(resp.status)
    }

    /// Full two-step handshake: bootstrap the token, then submit credentials.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn login(&self, credentials: &Credentials) -> Result<u16, ApiError> {
        let primed = self.csrf_cookie().await?;
        self.submit_login(primed, credentials).await
    }

    /// `GET /api/user`: identity of the session owner.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] with 401 when there is no valid session,
    /// [`ApiError::Decode`] if the body is not a JSON object.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let request = self.prepare(Method::Get, &self.config.endpoints.user);
        self.execute(request).await?.json()
    }

    /// `POST /logout`: destroy the server-side session.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or [`ApiError::Status`] on a non-2xx answer.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let request = self
            .prepare(Method::Post, &self.config.endpoints.logout)
            .with_json(serde_json::json!({}));
        self.execute(request).await?;
        Ok(())
    }

    /// Expire every cookie visible to page script. Returns how many were cleared.
    ///
    /// HTTP-only cookies are invisible in the browser and survive this.
    pub fn clear_cookies(&self) -> usize {
        let Some(current) = self.transport.document_cookies() else {
            return 0;
        };
        let names = cookies::names(&current);
        for name in &names {
            self.transport.write_cookie(&cookies::expired_directive(name));
        }
        log::info!("cleared {} cookie(s)", names.len());
        names.len()
    }
}
