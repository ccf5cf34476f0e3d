//! Browser transport built on `gloo-net` fetch.
//!
//! Client-side (hydrate): real fetch calls with `credentials: include`, and
//! cookie access through `document.cookie`.
//! Server-side (SSR): every request fails and no cookies are visible, since
//! the session only exists in the user's browser.

#![allow(clippy::unused_async)]

#[cfg(all(test, not(feature = "hydrate")))]
#[path = "browser_test.rs"]
mod browser_test;

use async_trait::async_trait;

use super::transport::Transport;
use super::types::{HttpRequest, HttpResponse};
use crate::error::ApiError;

/// Transport for the page running in the user's browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;
            use web_sys::RequestCredentials;

            let mut builder = match request.method {
                super::types::Method::Get => Request::get(&request.url),
                super::types::Method::Post => Request::post(&request.url),
            }
            .credentials(RequestCredentials::Include);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            // fetch only rejects when no response arrived at all.
            let resp = match &request.body {
                Some(body) => builder
                    .json(body)
                    .map_err(|e| ApiError::Request(e.to_string()))?
                    .send()
                    .await
                    .map_err(|e| ApiError::NoResponse(e.to_string()))?,
                None => builder.send().await.map_err(|e| ApiError::NoResponse(e.to_string()))?,
            };

            let status = resp.status();
            let status_text = resp.status_text();
            let body = resp.text().await.map_err(|e| ApiError::NoResponse(e.to_string()))?;
            Ok(HttpResponse { status, status_text, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Request("not available on server".to_owned()))
        }
    }

    fn document_cookies(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            html_document()?.cookie().ok().filter(|c| !c.is_empty())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn write_cookie(&self, directive: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(doc) = html_document() else {
                log::warn!("no document; dropped cookie {directive:?}");
                return;
            };
            if let Err(e) = doc.set_cookie(directive) {
                log::warn!("document.cookie rejected {directive:?}: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = directive;
        }
    }
}

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}
