//! Fluent request builder.
//!
//! A [`RequestBuilder`] collects per-request settings, then each verb method
//! (`get`, `post`, ...) runs the full pipeline:
//!
//! 1. snapshot the [`Defaults`];
//! 2. resolve the URL ([`resolve::resolve_url`]);
//! 3. merge headers ([`resolve::merge_headers`]);
//! 4. send through the [`HttpClient`];
//! 5. reject non-2xx statuses, then decode the JSON body.
//!
//! # Example
//!
//! ```ignore
//! let user: User = RequestBuilder::with_client(client, defaults)
//!     .path("/users/1")
//!     .typed_header(HeaderType::Bearer, "token")
//!     .query("expand", "profile")
//!     .get()
//!     .await?;
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::body::APPLICATION_JSON;
use crate::{Defaults, Error, HeaderType, HttpClient, Method, Request, Result, resolve};

/// Timeout applied when [`RequestBuilder::timeout`] is not called.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const CONTENT_TYPE: &str = "Content-Type";

/// Builder for a single HTTP request.
///
/// Instance settings always take precedence over [`Defaults`]; see the
/// [module documentation](self) for the execution pipeline.
#[derive(Clone)]
pub struct RequestBuilder<C> {
    client: C,
    defaults: Arc<Defaults>,
    url: Option<String>,
    path: Option<String>,
    headers: HashMap<String, String>,
    ignored_headers: HashSet<String>,
    query: HashMap<String, String>,
    body: Option<Bytes>,
    timeout: Duration,
}

impl<C> std::fmt::Debug for RequestBuilder<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("url", &self.url)
            .field("path", &self.path)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("ignored_headers", &self.ignored_headers)
            .field("query", &self.query)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl<C: HttpClient> RequestBuilder<C> {
    /// Create a builder sending through `client` and inheriting `defaults`.
    #[must_use]
    pub fn with_client(client: C, defaults: Arc<Defaults>) -> Self {
        Self {
            client,
            defaults,
            url: None,
            path: None,
            headers: HashMap::new(),
            ignored_headers: HashSet::new(),
            query: HashMap::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Set the full URL. Overrides the default base URL and any [`path`](Self::path).
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set a path appended to the default base URL.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set a header for this request. Wins over a default with the same key.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set a header for this request using a [`HeaderType`] convention.
    #[must_use]
    pub fn typed_header(self, header: HeaderType, value: &str) -> Self {
        let (key, value) = header.pair(value);
        self.header(key, value)
    }

    /// Do not send the default header `key` with this request.
    ///
    /// Accepts a header name or a [`HeaderType`]. Headers set on this builder are
    /// never affected.
    #[must_use]
    pub fn ignore_header(self, key: impl AsRef<str>) -> Self {
        self.ignore_header_if(key, true)
    }

    /// Add (`true`) or remove (`false`) `key` from the ignored default headers.
    #[must_use]
    pub fn ignore_header_if(mut self, key: impl AsRef<str>, should_ignore: bool) -> Self {
        let key = key.as_ref();
        if should_ignore {
            self.ignored_headers.insert(key.to_string());
        } else {
            self.ignored_headers.remove(key);
        }
        self
    }

    /// Set a query parameter. Parameters are URL-encoded; order is unspecified.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Serialize `value` as the JSON request body.
    ///
    /// Sets `Content-Type: application/json` unless this builder already has a
    /// content type header, in any letter case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if serialization fails.
    pub fn body<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(crate::to_json(value)?);
        let has_content_type = self
            .headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE));
        if !has_content_type {
            self.headers
                .insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        }
        Ok(self)
    }

    /// Override the 60 second default timeout for this request.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Headers set on this builder (defaults not included).
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Default header keys ignored by this builder.
    #[must_use]
    pub const fn ignored_headers(&self) -> &HashSet<String> {
        &self.ignored_headers
    }

    /// Serialized request body.
    #[must_use]
    pub const fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Timeout that will be applied.
    #[must_use]
    pub const fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    /// Assemble the outbound request against the current defaults, without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL cannot be resolved.
    pub fn build(&self, method: Method) -> Result<Request<Bytes>> {
        let defaults = self.defaults.snapshot();

        let url = resolve::resolve_url(
            self.url.as_deref(),
            defaults.base_url.as_deref(),
            self.path.as_deref(),
            &self.query,
        )?;
        let headers =
            resolve::merge_headers(defaults.headers, &self.ignored_headers, &self.headers);

        if self.body.is_some() && !method.expects_body() {
            debug!(%method, "sending a body with a method that usually has none");
        }

        Ok(Request::from_parts(
            method,
            url,
            headers,
            self.body.clone(),
            Some(self.timeout),
        ))
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Send a GET request and decode the response.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn get<T: DeserializeOwned>(&self) -> Result<T> {
        self.send(Method::Get).await
    }

    /// Send a POST request and decode the response.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn post<T: DeserializeOwned>(&self) -> Result<T> {
        self.send(Method::Post).await
    }

    /// Send a PUT request and decode the response.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn put<T: DeserializeOwned>(&self) -> Result<T> {
        self.send(Method::Put).await
    }

    /// Send a DELETE request and decode the response.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn delete<T: DeserializeOwned>(&self) -> Result<T> {
        self.send(Method::Delete).await
    }

    /// Send a PATCH request and decode the response.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn patch<T: DeserializeOwned>(&self) -> Result<T> {
        self.send(Method::Patch).await
    }

    /// Send a request with `method` and decode the JSON response into `T`.
    ///
    /// Every call re-reads the defaults and repeats the whole pipeline.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if no valid URL can be resolved
    /// - [`Error::RequestFailed`] if the transport fails (including timeouts)
    /// - [`Error::Http`] if the status is outside `200..=299`
    /// - [`Error::NoData`] if the body is empty and `T` needs content
    /// - [`Error::Decoding`] if the body does not decode into `T`
    pub async fn send<T: DeserializeOwned>(&self, method: Method) -> Result<T> {
        let request = self.build(method)?;
        let url = request.url().clone();
        debug!(%method, %url, timeout = ?self.timeout, "sending request");

        let response = self
            .client
            .execute(request)
            .await
            .inspect_err(|err| warn!(%method, %url, error = %err, "request failed"))?;

        response.into_json().inspect_err(|err| match err {
            Error::Http { status, .. } => warn!(%method, %url, status, "unsuccessful status"),
            Error::Decoding { path, message } => {
                warn!(%method, %url, %path, %message, "response did not decode");
            }
            _ => {}
        })
    }
}
