//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::api::AuthClient;
use super::transport::Transport;
use super::types::{HttpRequest, HttpResponse};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::util::cookies;

pub(crate) const TEST_BASE_URL: &str = "http://api.test";

/// One scripted answer, consumed in order.
pub(crate) enum MockReply {
    Respond { response: HttpResponse, set_cookie: Option<(String, String)> },
    Fail(ApiError),
}

impl MockReply {
    pub(crate) fn status(status: u16, status_text: &str, body: &str) -> Self {
        Self::Respond {
            response: HttpResponse { status, status_text: status_text.to_owned(), body: body.to_owned() },
            set_cookie: None,
        }
    }

    pub(crate) fn ok_json(body: &serde_json::Value) -> Self {
        Self::status(200, "OK", &body.to_string())
    }

    /// Response that also stores a cookie, like a `Set-Cookie` header would.
    pub(crate) fn with_cookie(self, name: &str, value: &str) -> Self {
        match self {
            Self::Respond { response, .. } => Self::Respond {
                response,
                set_cookie: Some((name.to_owned(), value.to_owned())),
            },
            fail @ Self::Fail(_) => fail,
        }
    }
}

/// Transport that replays [`MockReply`]s and records every request.
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    sent: Mutex<Vec<HttpRequest>>,
    jar: Mutex<Vec<(String, String)>>,
}

impl MockTransport {
    pub(crate) fn new(replies: Vec<MockReply>) -> Self {
        Self { replies: Mutex::new(replies.into()), ..Self::default() }
    }

    pub(crate) fn with_cookies(self, cookies: &[(&str, &str)]) -> Self {
        {
            let mut jar = self.jar.lock().expect("jar mutex should lock");
            jar.extend(cookies.iter().map(|(n, v)| ((*n).to_owned(), (*v).to_owned())));
        }
        self
    }

    pub(crate) fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().expect("sent mutex should lock").clone()
    }

    fn set(&self, name: &str, value: &str) {
        let mut jar = self.jar.lock().expect("jar mutex should lock");
        jar.retain(|(n, _)| n != name);
        jar.push((name.to_owned(), value.to_owned()));
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.lock().expect("sent mutex should lock").push(request);
        let reply = self
            .replies
            .lock()
            .expect("replies mutex should lock")
            .pop_front()
            .expect("unexpected request: no scripted reply left");
        match reply {
            MockReply::Respond { response, set_cookie } => {
                if let Some((name, value)) = set_cookie {
                    self.set(&name, &value);
                }
                Ok(response)
            }
            MockReply::Fail(err) => Err(err),
        }
    }

    fn document_cookies(&self) -> Option<String> {
        let jar = self.jar.lock().expect("jar mutex should lock");
        if jar.is_empty() {
            return None;
        }
        Some(jar.iter().map(|(n, v)| format!("{n}={v}")).collect::<Vec<_>>().join("; "))
    }

    fn write_cookie(&self, directive: &str) {
        let Some((name, value)) = cookies::pairs(directive).next() else {
            return;
        };
        let expired = directive.to_ascii_lowercase().contains("max-age=0");
        if expired {
            let mut jar = self.jar.lock().expect("jar mutex should lock");
            jar.retain(|(n, _)| n != name);
        } else {
            self.set(name, value);
        }
    }
}

pub(crate) fn client(replies: Vec<MockReply>) -> AuthClient<MockTransport> {
    AuthClient::new(ClientConfig::with_base_url(TEST_BASE_URL).shared(), MockTransport::new(replies))
}

pub(crate) fn client_with_transport(transport: MockTransport) -> AuthClient<MockTransport> {
    AuthClient::new(ClientConfig::with_base_url(TEST_BASE_URL).shared(), transport)
}
