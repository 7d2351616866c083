//! Process-wide defaults and transport.
//!
//! Both are created lazily on first use and live for the rest of the process.

use std::sync::{Arc, LazyLock};

use pumpkin_core::{Defaults, RequestBuilder};

use crate::HyperClient;

static DEFAULTS: LazyLock<Arc<Defaults>> = LazyLock::new(|| Arc::new(Defaults::new()));

static CLIENT: LazyLock<HyperClient> =
    LazyLock::new(|| HyperClient::builder().with_logging().build());

/// Defaults inherited by every request created with [`request()`].
///
/// ```
/// pumpkin::defaults().set_base_url("https://api.example.com");
/// pumpkin::defaults().set_typed_header(pumpkin::HeaderType::ApiKey, "key");
/// # pumpkin::defaults().clear_all();
/// ```
#[must_use]
pub fn defaults() -> &'static Defaults {
    &DEFAULTS
}

/// Shared handle to the process-wide [`Defaults`].
#[must_use]
pub fn shared_defaults() -> Arc<Defaults> {
    Arc::clone(&DEFAULTS)
}

/// Process-wide transport used by [`request()`].
#[must_use]
pub fn client() -> &'static HyperClient {
    &CLIENT
}

/// Start a new request using the process-wide defaults and transport.
///
/// # Example
///
/// ```ignore
/// pumpkin::defaults().set_base_url("https://jsonplaceholder.typicode.com");
///
/// let user: User = pumpkin::request().path("/users/1").get().await?;
/// ```
#[must_use]
pub fn request() -> RequestBuilder<HyperClient> {
    RequestBuilder::with_client(client().clone(), shared_defaults())
}
