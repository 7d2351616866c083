//! HTTP response returned by an [`HttpClient`](crate::HttpClient).

use std::collections::HashMap;

use bytes::Bytes;

/// HTTP response with status, headers, and buffered body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub const fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Status is in `200..=299`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl Response<Bytes> {
    /// Turn the response into the decoded target value.
    ///
    /// Non-2xx statuses become [`Error::Http`](crate::Error::Http) with the raw body;
    /// 2xx bodies are decoded with [`decode_body`](crate::decode_body).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`](crate::Error::Http), [`Error::NoData`](crate::Error::NoData)
    /// or [`Error::Decoding`](crate::Error::Decoding).
    pub fn into_json<T: serde::de::DeserializeOwned>(self) -> crate::Result<T> {
        if !self.is_success() {
            return Err(crate::Error::http(self.status, self.body));
        }
        crate::decode_body(&self.body)
    }
}
