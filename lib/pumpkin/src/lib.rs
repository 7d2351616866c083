//! Fluent HTTP request builder with process-wide defaults.
//!
//! Configure a base URL and common headers once, then build requests that
//! inherit them, override or drop individual headers, and decode JSON
//! responses into typed values.
//!
//! # Example
//!
//! ```ignore
//! use pumpkin::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! pumpkin::defaults().set_base_url("https://api.example.com");
//! pumpkin::defaults().set_typed_header(HeaderType::Bearer, "token");
//!
//! let user: User = pumpkin::request()
//!     .path("/users/42")
//!     .query("expand", "profile")
//!     .get()
//!     .await?;
//! ```
//!
//! Requests can also run against an injected transport and an isolated set
//! of defaults with [`RequestBuilder::with_client`].

mod client;
mod config;
mod connector;
mod global;
pub mod middleware;
pub mod prelude;

pub use client::{BoxedService, HyperClient, HyperClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_CONNECT_TIMEOUT};
pub use global::{client, defaults, request, shared_defaults};

// Re-export tower for middleware composition
pub use tower;

pub use pumpkin_core::{
    APPLICATION_JSON, ClearOption, DEFAULT_TIMEOUT, Defaults, DefaultsSnapshot, Error, HeaderType,
    HttpClient, Method, Request, RequestBuilder, Response, Result, TransportError, UrlError,
    decode_body, from_json, resolve, to_json,
};

pub use url;
