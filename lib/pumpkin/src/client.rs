//! hyper-util transport behind [`HttpClient`](crate::HttpClient).

use std::collections::HashMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use tower::util::BoxCloneService;
use tower::{Layer, ServiceExt};
use tower_service::Service;

use crate::config::{ClientConfig, ClientConfigBuilder};
use crate::connector::https_connector;
use crate::middleware::LoggingLayer;
use crate::{Error, Request, Response, Result};

/// The transport with its middleware erased; what [`Layer`]s wrap.
pub type BoxedService = BoxCloneService<Request<Bytes>, Response<Bytes>, Error>;

type ExchangeFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send>>;

type WrapFn = Box<dyn FnOnce(BoxedService) -> BoxedService + Send>;

// ============================================================================
// Wire
// ============================================================================

/// Bottom of the middleware stack: one hyper round trip per call.
#[derive(Clone)]
struct Wire {
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    fallback_timeout: Duration,
}

impl Wire {
    fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new())
                .build(https_connector(config.connect_timeout)),
            fallback_timeout: config.timeout,
        }
    }

    async fn exchange(self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let deadline = request.timeout().unwrap_or(self.fallback_timeout);
        let outbound = to_http_request(request)?;

        // The deadline also covers reading the body.
        let round_trip = async {
            let response = self
                .client
                .request(outbound)
                .await
                .map_err(|err| classify(&err))?;

            let status = response.status().as_u16();
            let headers = header_strings(response.headers());
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|err| Error::connection(err.to_string()))?
                .to_bytes();

            Ok::<_, Error>(Response::new(status, headers, body))
        };

        tokio::time::timeout(deadline, round_trip)
            .await
            .map_err(|_| Error::timeout())?
    }
}

impl Service<Request<Bytes>> for Wire {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ExchangeFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        Box::pin(self.clone().exchange(request))
    }
}

/// Header names that differ only in letter case end up as one field.
fn to_http_request(request: Request<Bytes>) -> Result<http::Request<Full<Bytes>>> {
    let (method, url, headers, body, _) = request.into_parts();

    let mut fields = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| Error::invalid_request(format!("header name `{name}`: {err}")))?;
        let value = HeaderValue::try_from(value)
            .map_err(|err| Error::invalid_request(format!("header `{name}`: {err}")))?;
        fields.insert(name, value);
    }

    let mut outbound = http::Request::builder()
        .method(http::Method::from(method))
        .uri(url.as_str())
        .body(body.map_or_else(Full::default, Full::new))
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    *outbound.headers_mut() = fields;

    Ok(outbound)
}

/// Response header names come back lower-cased; non-text values are skipped.
fn header_strings(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

fn classify(err: &hyper_util::client::legacy::Error) -> Error {
    if caused_by_tls(err) {
        Error::tls(err.to_string())
    } else {
        Error::connection(err.to_string())
    }
}

/// hyper-rustls reports handshake failures as an `io::Error` wrapping a `rustls::Error`.
fn caused_by_tls(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if err.is::<rustls::Error>() {
            return true;
        }
        if let Some(io) = err.downcast_ref::<std::io::Error>()
            && io.get_ref().is_some_and(|inner| inner.is::<rustls::Error>())
        {
            return true;
        }
        current = err.source();
    }
    false
}

// ============================================================================
// Public Client
// ============================================================================

/// HTTP client using hyper-util with rustls and tower middleware.
///
/// This is the transport behind [`request()`](crate::request). Any other
/// [`HttpClient`](crate::HttpClient) can be used through
/// [`RequestBuilder::with_client`](crate::RequestBuilder::with_client).
///
/// # Example
///
/// ```ignore
/// use pumpkin::HyperClient;
/// use std::time::Duration;
///
/// let client = HyperClient::builder()
///     .connect_timeout(Duration::from_secs(3))
///     .with_logging()
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    stack: Arc<Mutex<BoxedService>>,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Client with the default configuration and no middleware.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Client with `config` and no middleware.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self::from_stack(BoxCloneService::new(Wire::new(config)), config)
    }

    /// Start configuring a client.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Settings this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn from_stack(stack: BoxedService, config: ClientConfig) -> Self {
        Self {
            stack: Arc::new(Mutex::new(stack)),
            config,
        }
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl pumpkin_core::HttpClient for HyperClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        // `BoxCloneService` is not `Sync`: take a clone, never hold the lock while sending.
        let service = self
            .stack
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        service.oneshot(request).await
    }
}

/// Builder for [`HyperClient`].
///
/// ```ignore
/// use pumpkin::HyperClient;
/// use pumpkin::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
    wraps: Vec<WrapFn>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers", &self.wraps.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Deadline for requests that do not set their own.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Deadline for establishing the TCP connection.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Wrap the transport in a tower layer. The first layer added sits
    /// closest to the wire.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + 'static,
        L::Service: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send,
    {
        self.wraps
            .push(Box::new(move |inner| BoxCloneService::new(layer.layer(inner))));
        self
    }

    /// Log a summary of each request at info level.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Log header names, body size and timeout of each request at debug level.
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let config = self.config.build();
        let wire: BoxedService = BoxCloneService::new(Wire::new(config));
        let stack = self.wraps.into_iter().fold(wire, |inner, wrap| wrap(inner));

        HyperClient::from_stack(stack, config)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::Method;

    fn request_with(headers: &[(&str, &str)]) -> Request<Bytes> {
        let url = url::Url::parse("https://api.example.com/users?page=1").expect("url");
        let headers = headers
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        Request::from_parts(
            Method::Patch,
            url,
            headers,
            Some(Bytes::from_static(b"{}")),
            None,
        )
    }

    #[test]
    fn builder_applies_config_and_counts_layers() {
        let builder = HyperClient::builder()
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(1))
            .with_logging()
            .with_debug_logging();
        check!(format!("{builder:?}").contains("layers: 2"));

        let client = builder.build();
        check!(client.config().timeout == Duration::from_secs(5));
        check!(client.config().connect_timeout == Duration::from_secs(1));
        check!(HyperClient::new().config() == &ClientConfig::default());
    }

    #[test]
    fn http_request_carries_parts() {
        let_assert!(Ok(outbound) = to_http_request(request_with(&[("X-API-Key", "k")])));

        check!(outbound.method() == http::Method::PATCH);
        check!(outbound.uri() == "https://api.example.com/users?page=1");
        check!(outbound.headers()["x-api-key"] == "k");
    }

    #[test]
    fn http_request_sends_each_header_name_once() {
        let request = request_with(&[("accept", "text/plain"), ("Accept", "application/json")]);
        let_assert!(Ok(outbound) = to_http_request(request));

        check!(outbound.headers().get_all("accept").iter().count() == 1);
    }

    #[test]
    fn invalid_header_name_is_request_failed() {
        let_assert!(Err(err) = to_http_request(request_with(&[("Bad Header", "v")])));
        check!(matches!(err, Error::RequestFailed(_)));
    }

    #[test]
    fn rustls_failures_are_recognised() {
        let handshake = std::io::Error::other(rustls::Error::General("bad certificate".into()));
        check!(caused_by_tls(&handshake));

        let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        check!(!caused_by_tls(&refused));
    }
}
