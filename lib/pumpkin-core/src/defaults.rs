//! Process-wide request defaults.
//!
//! [`Defaults`] holds a base URL and a header map that every
//! [`RequestBuilder`](crate::RequestBuilder) inherits at execution time.
//! Reads hand out owned snapshots, so a request in flight is never affected by
//! later mutations.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::HeaderType;

/// What [`Defaults::clear`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClearOption {
    /// Base URL and headers.
    #[default]
    All,
    /// Headers only; the base URL is kept.
    Headers,
    /// Base URL only; headers are kept.
    BaseUrl,
}

/// Point-in-time copy of [`Defaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultsSnapshot {
    /// Base URL that paths are resolved against.
    pub base_url: Option<String>,
    /// Headers sent with every request.
    pub headers: HashMap<String, String>,
}

/// Base URL and headers shared by all requests.
///
/// Safe to use from any number of tasks; every operation takes the internal
/// lock once and never across an `.await`.
///
/// # Example
///
/// ```
/// use pumpkin_core::{ClearOption, Defaults, HeaderType};
///
/// let defaults = Defaults::new();
/// defaults.set_base_url("https://api.example.com");
/// defaults.set_typed_header(HeaderType::Bearer, "token");
///
/// assert_eq!(defaults.headers()["Authorization"], "Bearer token");
///
/// defaults.clear(ClearOption::Headers);
/// assert!(defaults.headers().is_empty());
/// assert_eq!(defaults.base_url().as_deref(), Some("https://api.example.com"));
/// ```
#[derive(Debug, Default)]
pub struct Defaults {
    state: RwLock<DefaultsSnapshot>,
}

impl Defaults {
    /// Create empty defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation is a single insert or clear, so a poisoned lock still
    // guards consistent state.
    fn read(&self) -> RwLockReadGuard<'_, DefaultsSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DefaultsSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the base URL. Not validated until a request uses it.
    pub fn set_base_url(&self, url: impl Into<String>) {
        let url = url.into();
        debug!(base_url = %url, "default base URL set");
        self.write().base_url = Some(url);
    }

    /// Insert or replace a default header.
    pub fn set_header(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        debug!(header = %key, "default header set");
        self.write().headers.insert(key, value.into());
    }

    /// Insert or replace a default header using a [`HeaderType`] convention.
    pub fn set_typed_header(&self, header: HeaderType, token: &str) {
        let (key, value) = header.pair(token);
        self.set_header(key, value);
    }

    /// Remove a single default header, returning its previous value.
    pub fn remove_header(&self, key: &str) -> Option<String> {
        self.write().headers.remove(key)
    }

    /// Clear base URL and/or headers.
    pub fn clear(&self, option: ClearOption) {
        let mut state = self.write();
        match option {
            ClearOption::All => {
                state.base_url = None;
                state.headers.clear();
            }
            ClearOption::Headers => state.headers.clear(),
            ClearOption::BaseUrl => state.base_url = None,
        }
        debug!(?option, "defaults cleared");
    }

    /// Clear everything; same as `clear(ClearOption::All)`.
    pub fn clear_all(&self) {
        self.clear(ClearOption::default());
    }

    /// Current base URL.
    #[must_use]
    pub fn base_url(&self) -> Option<String> {
        self.read().base_url.clone()
    }

    /// Current default headers.
    #[must_use]
    pub fn headers(&self) -> HashMap<String, String> {
        self.read().headers.clone()
    }

    /// Base URL and headers read under a single lock acquisition.
    #[must_use]
    pub fn snapshot(&self) -> DefaultsSnapshot {
        self.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert2::check;

    use super::*;

    fn populated() -> Defaults {
        let defaults = Defaults::new();
        defaults.set_base_url("https://api.example.com");
        defaults.set_header("X-Test", "value");
        defaults
    }

    #[test]
    fn set_base_url() {
        let defaults = Defaults::new();
        check!(defaults.base_url().is_none());

        defaults.set_base_url("https://api.example.com");
        check!(defaults.base_url().as_deref() == Some("https://api.example.com"));

        defaults.set_base_url("not validated");
        check!(defaults.base_url().as_deref() == Some("not validated"));
    }

    #[test]
    fn set_header_last_write_wins() {
        let defaults = Defaults::new();
        defaults.set_header("X-Custom-Header", "first");
        defaults.set_header("X-Custom-Header", "custom-value");

        let headers = defaults.headers();
        check!(headers.len() == 1);
        check!(headers["X-Custom-Header"] == "custom-value");
    }

    #[test]
    fn header_keys_are_case_sensitive() {
        let defaults = Defaults::new();
        defaults.set_header("X-Test", "upper");
        defaults.set_header("x-test", "lower");

        check!(defaults.headers().len() == 2);
    }

    #[test]
    fn set_typed_headers() {
        let defaults = Defaults::new();
        defaults.set_typed_header(HeaderType::Basic, "credentials");
        check!(defaults.headers()["Authorization"] == "Basic credentials");

        defaults.set_typed_header(HeaderType::Bearer, "test-token");
        defaults.set_typed_header(HeaderType::ApiKey, "api-key-123");
        defaults.set_typed_header(HeaderType::ContentType, "application/xml");
        defaults.set_typed_header(HeaderType::Accept, "application/json");

        let headers = defaults.headers();
        check!(headers["Authorization"] == "Bearer test-token");
        check!(headers["X-API-Key"] == "api-key-123");
        check!(headers["Content-Type"] == "application/xml");
        check!(headers["Accept"] == "application/json");
    }

    #[test]
    fn remove_header() {
        let defaults = populated();
        check!(defaults.remove_header("X-Test").as_deref() == Some("value"));
        check!(defaults.remove_header("X-Test").is_none());
        check!(defaults.base_url().is_some());
    }

    #[test]
    fn clear_all() {
        let defaults = populated();
        defaults.clear(ClearOption::All);

        check!(defaults.base_url().is_none());
        check!(defaults.headers().is_empty());
    }

    #[test]
    fn clear_headers_keeps_base_url() {
        let defaults = populated();
        defaults.clear(ClearOption::Headers);

        check!(defaults.base_url().as_deref() == Some("https://api.example.com"));
        check!(defaults.headers().is_empty());
    }

    #[test]
    fn clear_base_url_keeps_headers() {
        let defaults = populated();
        defaults.clear(ClearOption::BaseUrl);

        check!(defaults.base_url().is_none());
        check!(defaults.headers()["X-Test"] == "value");
    }

    #[test]
    fn clear_defaults_to_all() {
        let defaults = populated();
        defaults.clear_all();
        check!(defaults.snapshot() == DefaultsSnapshot::default());

        // Idempotent
        defaults.clear_all();
        check!(defaults.headers().is_empty());
    }

    #[test]
    fn snapshot_is_detached() {
        let defaults = populated();
        let snapshot = defaults.snapshot();

        defaults.clear_all();

        check!(snapshot.base_url.as_deref() == Some("https://api.example.com"));
        check!(snapshot.headers["X-Test"] == "value");
    }

    #[test]
    fn concurrent_writers_lose_no_updates() {
        let defaults = Arc::new(Defaults::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let defaults = Arc::clone(&defaults);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        defaults.set_header(format!("X-{t}-{i}"), i.to_string());
                        let _ = defaults.snapshot();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread");
        }

        check!(defaults.headers().len() == 400);
    }
}
