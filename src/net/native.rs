//! Native transport built on `reqwest` with a persistent cookie store.
//!
//! The store plays the role of the browser's cookie jar: cookies set by the
//! bootstrap and login responses are replayed on later requests, and the
//! anti-forgery cookie is readable through [`Transport::document_cookies`].
//! HTTP-only cookies are sent but never exposed, as in a browser.

use std::sync::Arc;

use async_trait::async_trait;
use cookie_store::CookieStore;
use reqwest::{Client, Url};
use reqwest_cookie_store::CookieStoreMutex;

use super::transport::Transport;
use super::types::{HttpRequest, HttpResponse, Method};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// Transport for native callers (tools, integration tests).
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
    cookies: Arc<CookieStoreMutex>,
    origin: Url,
}

impl ReqwestTransport {
    /// Build a transport whose cookie store is scoped to the configured API origin.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL does not parse or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let origin = Url::parse(&config.url("/")).map_err(|e| ApiError::Config(format!("base url: {e}")))?;
        let cookies = Arc::new(CookieStoreMutex::new(CookieStore::default()));
        let http = Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(|e| ApiError::Config(format!("http client: {e}")))?;
        Ok(Self { http, cookies, origin })
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => self.http.get(&request.url),
            Method::Post => self.http.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(classify)?;
        let status = resp.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_owned();
        let body = resp.text().await.map_err(classify)?;
        Ok(HttpResponse { status: status.as_u16(), status_text, body })
    }

    fn document_cookies(&self) -> Option<String> {
        let store = self.cookies.lock().ok()?;
        let visible: Vec<String> = store
            .matches(&self.origin)
            .into_iter()
            .filter(|c| c.http_only() != Some(true))
            .map(|c| format!("{}={}", c.name(), c.value()))
            .collect();
        (!visible.is_empty()).then(|| visible.join("; "))
    }

    fn write_cookie(&self, directive: &str) {
        let Ok(mut store) = self.cookies.lock() else {
            log::warn!("cookie store lock poisoned; dropped {directive:?}");
            return;
        };
        if let Err(e) = store.parse(directive, &self.origin) {
            log::warn!("rejected cookie {directive:?}: {e}");
        }
    }
}

fn classify(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::Request(err.to_string())
    } else {
        ApiError::NoResponse(err.to_string())
    }
}
