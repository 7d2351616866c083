//! Core types and request resolution for the pumpkin HTTP request builder.
//!
//! This crate provides everything that does not touch the network:
//! - [`Defaults`] - base URL and headers shared by every request
//! - [`RequestBuilder`] - fluent per-request configuration and execution
//! - [`resolve`] - URL resolution and header merge rules
//! - [`HeaderType`] - named header conventions (bearer, API key, ...)
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`Response`] - what flows through an [`HttpClient`]
//! - [`HttpClient`] - transport trait
//! - [`Error`] and [`Result`] - error handling
//!
//! The `pumpkin` crate adds a hyper-based [`HttpClient`] and process-wide
//! defaults on top of this.

mod body;
mod builder;
mod client;
mod defaults;
mod error;
mod header;
mod method;
pub mod prelude;
mod request;
pub mod resolve;
mod response;

pub use body::{APPLICATION_JSON, decode_body, from_json, to_json};
pub use builder::{DEFAULT_TIMEOUT, RequestBuilder};
pub use client::HttpClient;
pub use defaults::{ClearOption, Defaults, DefaultsSnapshot};
pub use error::{Error, Result, TransportError, UrlError};
pub use header::HeaderType;
pub use method::Method;
pub use request::{Request, RequestParts};
pub use response::Response;
