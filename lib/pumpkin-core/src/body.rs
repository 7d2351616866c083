//! JSON body codec.

use bytes::Bytes;

use crate::{Error, Result};

/// MIME type attached to JSON request bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if JSON serialization fails.
///
/// # Example
///
/// ```
/// use pumpkin_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Error::Encoding)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns [`Error::Decoding`] carrying the path of the field that failed
/// (e.g. `user.address.city`).
///
/// # Example
///
/// ```
/// use pumpkin_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let user: User = from_json(br#"{"name":"Alice"}"#).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| Error::decoding(e.path().to_string(), e.inner().to_string()))
}

/// Decode a successful response body.
///
/// An empty (or whitespace-only) body is decoded as JSON `null`, so `()` and
/// `Option<T>` targets accept e.g. `204 No Content`. Targets that cannot be
/// built from `null` fail with [`Error::NoData`] instead of a decoding error.
///
/// # Errors
///
/// Returns [`Error::NoData`] or [`Error::Decoding`].
pub fn decode_body<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| Error::NoData);
    }
    from_json(bytes)
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn to_json_serialize() {
        #[derive(serde::Serialize)]
        struct User {
            name: String,
            age: u32,
        }

        let user = User {
            name: "Alice".to_string(),
            age: 30,
        };

        let bytes = to_json(&user).expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"name":"Alice","age":30}"#);
    }

    #[test]
    fn to_json_non_string_map_key_fails() {
        let mut map = std::collections::BTreeMap::new();
        map.insert((1, 2), "pair keys are not JSON object keys");

        let_assert!(Err(Error::Encoding(_)) = to_json(&map));
    }

    #[test]
    fn from_json_syntax_error() {
        let result: Result<serde_json::Value> = from_json(b"not json");

        let_assert!(Err(err) = result);
        check!(err.is_decoding());
    }

    #[test]
    fn from_json_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            address: Address,
        }

        let result: Result<User> = from_json(br#"{"address":{}}"#);

        let_assert!(Err(Error::Decoding { path, message }) = result);
        check!(path == "address");
        check!(message.contains("city"));
    }

    #[test]
    fn decode_body_empty_into_unit_and_option() {
        let_assert!(Ok(()) = decode_body::<()>(b""));
        let_assert!(Ok(None) = decode_body::<Option<u32>>(b"  \n"));
    }

    #[test]
    fn decode_body_empty_into_struct_is_no_data() {
        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            id: u64,
        }

        let_assert!(Err(Error::NoData) = decode_body::<User>(b""));
    }

    #[test]
    fn decode_body_with_content() {
        let_assert!(Ok(value) = decode_body::<Vec<u32>>(b"[1,2,3]"));
        check!(value == vec![1, 2, 3]);
    }
}
