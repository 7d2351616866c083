//! Error types for pumpkin.
//!
//! Every failure of a request surfaces as exactly one [`Error`] variant:
//! URL resolution, body encoding, transport, HTTP status or response decoding.

use bytes::Bytes;
use derive_more::{Display, Error, From};

// ============================================================================
// URL Errors
// ============================================================================

/// Reason a request URL could not be resolved.
#[derive(Debug, Display, Error)]
pub enum UrlError {
    /// A path was configured but no base URL exists to resolve it against.
    #[display("path `{_0}` requires a base URL")]
    PathWithoutBaseUrl(#[error(not(source))] String),

    /// Neither an explicit URL, a base URL nor a path was configured.
    #[display("no URL configured")]
    Missing,

    /// The resolved string is not a valid URL.
    #[display("cannot parse `{input}`: {source}")]
    Parse {
        /// The string that failed to parse.
        input: String,
        /// Underlying parse error.
        source: url::ParseError,
    },

    /// The URL has no hierarchical part (e.g. `mailto:`), so it cannot be requested.
    #[display("`{_0}` is not a hierarchical URL")]
    CannotBeABase(#[error(not(source))] String),
}

// ============================================================================
// Transport Errors
// ============================================================================

/// Failure reported by an [`HttpClient`](crate::HttpClient) implementation.
#[derive(Debug, Display, Error)]
pub enum TransportError {
    /// Network/connection errors (DNS, refused, reset, ...).
    #[display("connection error: {_0}")]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// The request did not complete within its timeout.
    #[display("request timeout")]
    Timeout,

    /// The transport could not build a request from the given parts.
    #[display("invalid request: {_0}")]
    InvalidRequest(#[error(not(source))] String),
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for pumpkin operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The request URL could not be resolved or parsed.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(UrlError),

    /// A successful response carried no body, but the target type needs one.
    #[display("response contained no data")]
    #[from(skip)]
    NoData,

    /// The request body could not be serialized to JSON.
    #[display("JSON encoding error: {_0}")]
    #[from]
    Encoding(serde_json::Error),

    /// The response body could not be deserialized into the target type.
    #[display("JSON decoding error at '{path}': {message}")]
    #[from(skip)]
    Decoding {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// The server answered with a status outside `200..=299`.
    #[display("HTTP error {status}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        #[error(not(source))]
        body: Bytes,
    },

    /// The transport failed before an HTTP response was obtained.
    #[display("request failed: {_0}")]
    #[from]
    RequestFailed(TransportError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an HTTP status error.
    #[must_use]
    pub fn http(status: u16, body: impl Into<Bytes>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create a decoding error with path context.
    #[must_use]
    pub fn decoding(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decoding {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a connection failure.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::RequestFailed(TransportError::Connection(message.into()))
    }

    /// Create a TLS failure.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::RequestFailed(TransportError::Tls(message.into()))
    }

    /// Create a timeout failure.
    #[must_use]
    pub const fn timeout() -> Self {
        Self::RequestFailed(TransportError::Timeout)
    }

    /// Create an invalid request failure.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::RequestFailed(TransportError::InvalidRequest(message.into()))
    }

    /// Returns `true` if the URL could not be resolved.
    #[must_use]
    pub const fn is_invalid_url(&self) -> bool {
        matches!(self, Self::InvalidUrl(_))
    }

    /// Returns `true` if the request timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestFailed(TransportError::Timeout))
    }

    /// Returns `true` if a connection could not be established or was lost.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::RequestFailed(TransportError::Connection(_)))
    }

    /// Returns `true` if the response body failed to decode.
    #[must_use]
    pub const fn is_decoding(&self) -> bool {
        matches!(self, Self::Decoding { .. })
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the raw response body if this is an HTTP error.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Try to decode the HTTP error body as JSON.
    ///
    /// Returns `None` when this is not an HTTP error.
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(Debug, Deserialize)]
    /// struct ApiError {
    ///     message: String,
    /// }
    ///
    /// match pumpkin::request().path("/users/1").get::<User>().await {
    ///     Ok(user) => println!("User: {user:?}"),
    ///     Err(e) => match e.decode_body::<ApiError>() {
    ///         Some(Ok(api)) => println!("API error: {}", api.message),
    ///         _ => println!("Error: {e}"),
    ///     },
    /// }
    /// ```
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}
