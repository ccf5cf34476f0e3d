//! Client configuration for the external authentication API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once when the app mounts and shared with every call site through
//! Leptos context. Nothing here is mutated after construction, so every
//! request sees the same credential and anti-forgery policy.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::sync::Arc;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CSRF_COOKIE_PATH: &str = "/sanctum/csrf-cookie";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_USER_PATH: &str = "/api/user";
pub const DEFAULT_LOGOUT_PATH: &str = "/logout";
pub const DEFAULT_XSRF_COOKIE_NAME: &str = "XSRF-TOKEN";
pub const DEFAULT_XSRF_HEADER_NAME: &str = "X-XSRF-TOKEN";

/// Endpoint paths relative to the API base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub csrf_cookie: String,
    pub login: String,
    pub user: String,
    pub logout: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            csrf_cookie: DEFAULT_CSRF_COOKIE_PATH.to_owned(),
            login: DEFAULT_LOGIN_PATH.to_owned(),
            user: DEFAULT_USER_PATH.to_owned(),
            logout: DEFAULT_LOGOUT_PATH.to_owned(),
        }
    }
}

/// Immutable transport policy applied to every API request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the authentication service (e.g. `"http://localhost:8000"`).
    pub api_base_url: String,
    pub endpoints: Endpoints,
    /// Cookie the server uses to deliver the anti-forgery token.
    pub xsrf_cookie_name: String,
    /// Header the token is echoed back in.
    pub xsrf_header_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }
}

impl ClientConfig {
    /// Config pointing at `base_url` with the default endpoint layout.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.trim_end_matches('/').to_owned(),
            endpoints: Endpoints::default(),
            xsrf_cookie_name: DEFAULT_XSRF_COOKIE_NAME.to_owned(),
            xsrf_header_name: DEFAULT_XSRF_HEADER_NAME.to_owned(),
        }
    }

    /// Config baked in at compile time.
    ///
    /// `PORTAL_API_BASE_URL` overrides the default base URL when set (and
    /// non-empty) in the build environment. The browser has no runtime
    /// environment to read from.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::with_base_url(resolve_base_url(option_env!("PORTAL_API_BASE_URL")))
    }

    /// Absolute URL for an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.api_base_url)
        } else {
            format!("{}/{path}", self.api_base_url)
        }
    }

    /// Freeze the config for sharing across call sites.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

fn resolve_base_url(raw: Option<&str>) -> &str {
    raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_API_BASE_URL)
}
