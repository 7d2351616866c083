//! Tower middleware for [`HyperClient`](crate::HyperClient).
//!
//! Layers wrap the transport, below the request builder: they see the fully
//! merged request and the raw response, before status validation and decoding.
//!
//! - [`LoggingLayer`] - logs requests/responses using `tracing`
//!
//! Any `tower::Layer` over the boxed transport service can be added with
//! [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer).

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};
