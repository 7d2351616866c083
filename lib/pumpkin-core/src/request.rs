//! Fully-resolved outbound request handed to an [`HttpClient`](crate::HttpClient).
//!
//! Callers normally never build one directly: [`RequestBuilder`](crate::RequestBuilder)
//! produces it after merging defaults and resolving the URL.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::Method;

/// Parts of a [`Request`]: method, URL, headers, body and timeout.
pub type RequestParts<B> = (Method, Url, HashMap<String, String>, Option<B>, Option<Duration>);

/// An HTTP request with method, absolute URL, headers, optional body and timeout.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
    body: Option<B>,
    timeout: Option<Duration>,
}

impl<B> Request<B> {
    /// Creates a request without headers, body or timeout.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Creates a request from its parts.
    #[must_use]
    pub fn from_parts(
        method: Method,
        url: Url,
        headers: HashMap<String, String>,
        body: Option<B>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
            timeout,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Timeout for this request; `None` lets the client apply its own.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Consume into (method, url, headers, body, timeout).
    #[must_use]
    pub fn into_parts(self) -> RequestParts<B> {
        (self.method, self.url, self.headers, self.body, self.timeout)
    }
}
