//! Request/response logging middleware.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

/// Layer that logs every request sent through the transport.
///
/// Header values are never logged; at [`LogLevel::Debug`] the header names,
/// body size and timeout are added.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Verbosity of [`LoggingLayer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Request details at debug level.
    Debug,
    /// One summary line per request at info level.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a logging layer at info level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer at debug level.
    #[must_use]
    pub const fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Configured verbosity.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "http_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        let mut header_names: Vec<&str> =
                            request.headers().keys().map(String::as_str).collect();
                        header_names.sort_unstable();
                        debug!(
                            headers = ?header_names,
                            body_len = request.body().map_or(0, Bytes::len),
                            timeout = ?request.timeout(),
                            "sending request"
                        );
                    }
                    LogLevel::Info => info!("sending request"),
                }

                let result = inner.call(request).await;
                let elapsed = start.elapsed();

                match &result {
                    Ok(response) if response.is_success() => {
                        info!(status = response.status(), ?elapsed, "request completed");
                    }
                    Ok(response) => {
                        warn!(status = response.status(), ?elapsed, "unsuccessful status");
                    }
                    Err(err) => warn!(error = %err, ?elapsed, "request failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tower::ServiceExt;

    use super::*;
    use crate::Method;

    #[test]
    fn logging_layer_levels() {
        assert_eq!(LoggingLayer::new().level(), LogLevel::Info);
        assert_eq!(LoggingLayer::debug().level(), LogLevel::Debug);
    }

    #[tokio::test]
    async fn logging_passes_response_through() {
        let echo = tower::service_fn(|request: Request<Bytes>| async move {
            Ok::<_, Error>(Response::new(
                418,
                HashMap::new(),
                Bytes::from(request.url().path().to_string()),
            ))
        });
        let service = LoggingLayer::debug().layer(echo);

        let url = url::Url::parse("http://localhost/teapot").expect("url");
        let response = service
            .oneshot(Request::new(Method::Get, url))
            .await
            .expect("response");

        assert_eq!(response.status(), 418);
        assert_eq!(response.body().as_ref(), b"/teapot");
    }
}
