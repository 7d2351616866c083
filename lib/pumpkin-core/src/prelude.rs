//! Prelude module for convenient imports.
//!
//! ```ignore
//! use pumpkin_core::prelude::*;
//! ```

pub use crate::{
    ClearOption, Defaults, Error, HeaderType, HttpClient, Method, Request, RequestBuilder,
    Response, Result,
};
