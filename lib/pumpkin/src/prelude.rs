//! Prelude module for convenient imports.
//!
//! ```ignore
//! use pumpkin::prelude::*;
//! ```

pub use crate::{
    ClearOption, Defaults, Error, HeaderType, HttpClient, HyperClient, Method, RequestBuilder,
    Response, Result, defaults, request,
};
pub use serde::{Deserialize, Serialize};
