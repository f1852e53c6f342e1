//! I/O boundary traits for testability
//!
//! The catalog service talks to the network only through [`HttpTransport`],
//! allowing it to be tested with scripted fakes.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument};

use crate::infrastructure::error::{TransportError, TransportResult};

/// A fully decorated GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Endpoint URL without query string
    pub url: String,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Request headers, in order
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of the first header with this name (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Value of the first query parameter with this key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response of one exchange. The body is returned whatever the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport abstraction.
pub trait HttpTransport: Send + Sync {
    /// Perform a blocking GET and read the whole body.
    fn get(&self, request: &HttpRequest) -> TransportResult<HttpResponse>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real transport on a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::with_source("failed to build http client", e))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    #[instrument(level = "trace", skip(self, request), fields(url = %request.url))]
    fn get(&self, request: &HttpRequest) -> TransportResult<HttpResponse> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .map_err(|e| TransportError::with_source(format!("GET {}", request.url), e))?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {} returned http status {}", request.url, status);
        }

        let body = response.text().map_err(|e| {
            TransportError::with_source(format!("read body of {}", request.url), e)
        })?;

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
