//! HTTP client adapter for the backend REST API.
//!
//! DESIGN
//! ======
//! Every outbound call goes through [`Transport::request`]. The production
//! implementation wraps `reqwest`; tests inject their own transport. Calls
//! are fire-once: there is no retry and no backoff, and a timeout is only
//! applied when one is configured.
//!
//! ERROR HANDLING
//! ==============
//! Network failures, non-2xx statuses and malformed JSON all come back as
//! [`HttpError`], one variant per cause, so callers can log the detail but
//! treat every failure the same way.

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

pub const JSON_ACCEPT: &str = "application/json";
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

// =============================================================================
// TYPES
// =============================================================================

/// HTTP verbs used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// Errors produced by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    /// The configured base URL cannot be parsed.
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A resource path could not be joined onto the base URL.
    #[error("invalid request path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },

    /// The response body is not valid JSON.
    #[error("response is not valid JSON: {0}")]
    Decode(String),
}

/// Outbound request seam. One call, one response, no retries.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send `body` (if any) as JSON to `path` and return the decoded body.
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, HttpError>;
}

// =============================================================================
// REQWEST CLIENT
// =============================================================================

/// [`Transport`] backed by `reqwest`, rooted at a base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Build a client for `base_url`. A trailing `/` is added when missing so
    /// that relative resource paths join underneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, HttpError> {
        let base_url = parse_base_url(base_url)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| HttpError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl Transport for HttpClient {
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, HttpError> {
        let url = resolve(&self.base_url, path)?;
        let builder = match method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        };
        let mut builder = builder
            .header(ACCEPT, JSON_ACCEPT)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }

        tracing::debug!(%method, path, "backend request");
        let response = builder
            .send()
            .await
            .map_err(|e| HttpError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::Request(e.to_string()))?;

        parse_body(status, &text)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn parse_base_url(raw: &str) -> Result<Url, HttpError> {
    let normalized = if raw.ends_with('/') { raw.to_owned() } else { format!("{raw}/") };
    let url = Url::parse(&normalized)
        .map_err(|e| HttpError::InvalidBaseUrl { url: raw.to_owned(), reason: e.to_string() })?;
    if url.cannot_be_a_base() {
        return Err(HttpError::InvalidBaseUrl { url: raw.to_owned(), reason: "URL cannot be a base".to_owned() });
    }
    Ok(url)
}

/// Join a resource path under the base URL. A leading `/` is ignored so that
/// `/customer/` and `customer/` address the same endpoint.
fn resolve(base: &Url, path: &str) -> Result<Url, HttpError> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| HttpError::InvalidPath { path: path.to_owned(), reason: e.to_string() })
}

/// Map a raw response onto the adapter contract: non-2xx is an error, an
/// empty 2xx body is `null`, anything else must be JSON.
fn parse_body(status: u16, text: &str) -> Result<Value, HttpError> {
    if !(200..300).contains(&status) {
        return Err(HttpError::Status { status, body: text.to_owned() });
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| HttpError::Decode(e.to_string()))
}
