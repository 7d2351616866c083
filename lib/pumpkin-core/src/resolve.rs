//! URL resolution and header merging.
//!
//! These are the rules that turn a [`RequestBuilder`](crate::RequestBuilder)
//! plus a [`DefaultsSnapshot`](crate::DefaultsSnapshot) into the URL and headers
//! actually sent.

use std::collections::{HashMap, HashSet};

use url::Url;

use crate::{Result, UrlError};

/// Pick the URL string to request, before parsing.
///
/// First match wins:
/// 1. an explicit URL, verbatim;
/// 2. the base URL joined with `path` (exactly one `/` between them);
/// 3. the base URL alone when no path is set.
///
/// A path without a base URL, or nothing at all, is an error.
///
/// ```
/// use pumpkin_core::resolve::target;
///
/// let url = target(None, Some("https://api.example.com/"), Some("users/1")).unwrap();
/// assert_eq!(url, "https://api.example.com/users/1");
/// ```
///
/// # Errors
///
/// Returns [`UrlError::PathWithoutBaseUrl`] or [`UrlError::Missing`].
pub fn target(
    explicit: Option<&str>,
    base_url: Option<&str>,
    path: Option<&str>,
) -> std::result::Result<String, UrlError> {
    match (explicit, base_url, path) {
        (Some(url), _, _) => Ok(url.to_string()),
        (None, Some(base), Some(path)) => Ok(join(base, path)),
        (None, Some(base), None) => Ok(base.to_string()),
        (None, None, Some(path)) => Err(UrlError::PathWithoutBaseUrl(path.to_string())),
        (None, None, None) => Err(UrlError::Missing),
    }
}

fn join(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Resolve and parse the final request URL, then attach query parameters.
///
/// When `query` is non-empty it replaces any query already present in the
/// resolved URL. Parameters are URL-encoded and their order is unspecified.
/// An empty `query` leaves the URL's own query alone.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) when no URL can be
/// resolved, the string does not parse, or it is not a hierarchical URL.
pub fn resolve_url(
    explicit: Option<&str>,
    base_url: Option<&str>,
    path: Option<&str>,
    query: &HashMap<String, String>,
) -> Result<Url> {
    let input = target(explicit, base_url, path)?;

    let mut url = Url::parse(&input).map_err(|source| UrlError::Parse {
        input: input.clone(),
        source,
    })?;

    if url.cannot_be_a_base() {
        return Err(UrlError::CannotBeABase(input).into());
    }

    if !query.is_empty() {
        url.set_query(None);
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(url)
}

/// Merge default headers with instance headers.
///
/// Defaults whose key is in `ignored` are dropped, then instance headers are
/// laid on top. Instance headers always win and are never filtered by `ignored`.
///
/// `ignored` compares keys as exact strings. An instance header also replaces
/// a default whose name differs only in ASCII case, since both name the same
/// field on the wire.
#[must_use]
pub fn merge_headers(
    defaults: HashMap<String, String>,
    ignored: &HashSet<String>,
    instance: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged: HashMap<String, String> = defaults
        .into_iter()
        .filter(|(key, _)| !ignored.contains(key))
        .filter(|(key, _)| !instance.keys().any(|name| name.eq_ignore_ascii_case(key)))
        .collect();
    merged.extend(instance.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
