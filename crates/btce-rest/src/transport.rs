//! HTTP transport abstraction
//!
//! The client only needs two operations from the network: a form POST for
//! the trade API and a plain GET for public market data. Keeping them
//! behind a trait lets the request pipeline be tested without real calls.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{RestError, RestResult};

/// Content type of trade API bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Longest slice of an error body kept in [`RestError::Status`]
const ERROR_BODY_LIMIT: usize = 200;

/// Trait for HTTP transport abstraction
///
/// Implementations perform a single attempt and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a form-encoded body and return the response body
    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> RestResult<String>;

    /// GET a URL and return the response body
    async fn get(&self, url: &str) -> RestResult<String>;
}

/// Real transport using reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a request timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> RestResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn send_error(err: reqwest::Error) -> RestError {
    if err.is_timeout() {
        RestError::Timeout
    } else {
        RestError::Http(err)
    }
}

async fn read_body(response: reqwest::Response) -> RestResult<String> {
    let status = response.status();
    let body = response.text().await.map_err(send_error)?;

    if !status.is_success() {
        return Err(RestError::Status {
            status: status.as_u16(),
            body: body.chars().take(ERROR_BODY_LIMIT).collect(),
        });
    }

    debug!(status = status.as_u16(), len = body.len(), "Received response");
    Ok(body)
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, headers, body), fields(len = body.len()))]
    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> RestResult<String> {
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(CACHE_CONTROL, "no-cache");

        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .body(body.to_string())
            .send()
            .await
            .map_err(send_error)?;

        read_body(response).await
    }

    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> RestResult<String> {
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(send_error)?;

        read_body(response).await
    }
}

/// A request seen by [`MockTransport`]
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// "GET" or "POST"
    pub method: &'static str,
    /// Target URL
    pub url: String,
    /// Extra headers passed by the caller
    pub headers: Vec<(String, String)>,
    /// POST body
    pub body: Option<String>,
}

#[cfg(any(test, feature = "test-utils"))]
impl RecordedRequest {
    /// Value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decoded form fields of the body
    pub fn form(&self) -> Vec<(String, String)> {
        self.body
            .as_deref()
            .and_then(|body| serde_urlencoded::from_str(body).ok())
            .unwrap_or_default()
    }

    /// Value of a form field
    pub fn form_value(&self, key: &str) -> Option<String> {
        self.form()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Nonce of a trade API request
    pub fn nonce(&self) -> Option<u64> {
        self.form_value("nonce").and_then(|n| n.parse().ok())
    }
}

/// Mock transport for testing
///
/// Replays queued responses in order and records every request.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: parking_lot::Mutex<std::collections::VecDeque<RestResult<String>>>,
    requests: parking_lot::Mutex<Vec<RecordedRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a mock with no queued responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response body
    pub fn push_response(&self, body: impl Into<String>) {
        self.responses.lock().push_back(Ok(body.into()));
    }

    /// Queue a failure
    pub fn push_error(&self, error: RestError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    fn respond(&self, request: RecordedRequest) -> RestResult<String> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RestError::Transport("no mock response queued".to_string())))
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Transport for MockTransport {
    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> RestResult<String> {
        self.respond(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: Some(body.to_string()),
        })
    }

    async fn get(&self, url: &str) -> RestResult<String> {
        self.respond(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        })
    }
}
