//! Transport seam.
//!
//! [`HttpClient`] is the only thing [`RequestBuilder`](crate::RequestBuilder)
//! needs from the network. The `pumpkin` crate ships a hyper-based
//! implementation; tests plug in in-memory clients.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations send the fully-assembled request and buffer the response.
/// Any HTTP status is a successful execution; status validation happens in the
/// request builder.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestFailed`](crate::Error::RequestFailed) if no HTTP
    /// response could be obtained:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Requests the transport cannot represent
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        self.as_ref().execute(request)
    }
}

impl<C: HttpClient> HttpClient for &C {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}
