//! Named header conventions.

use derive_more::Display;

/// Well-known headers with a fixed name and a value-formatting rule.
///
/// ```
/// use pumpkin_core::HeaderType;
///
/// assert_eq!(HeaderType::Bearer.name(), "Authorization");
/// assert_eq!(HeaderType::Bearer.value("tok"), "Bearer tok");
/// assert_eq!(HeaderType::ApiKey.value("k"), "k");
/// ```
///
/// `HeaderType` implements `AsRef<str>` (yielding the header name) so it can be
/// passed wherever a header key is expected, e.g. when ignoring a default header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum HeaderType {
    /// `Authorization: Bearer <token>`.
    #[display("bearer")]
    Bearer,
    /// `Authorization: Basic <token>`.
    #[display("basic")]
    Basic,
    /// `X-API-Key: <token>`.
    #[display("api-key")]
    ApiKey,
    /// `Content-Type: <mime>`.
    #[display("content-type")]
    ContentType,
    /// `Accept: <mime>`.
    #[display("accept")]
    Accept,
}

impl HeaderType {
    /// Header name this convention writes to.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bearer | Self::Basic => "Authorization",
            Self::ApiKey => "X-API-Key",
            Self::ContentType => "Content-Type",
            Self::Accept => "Accept",
        }
    }

    /// Format `token` into the header value.
    #[must_use]
    pub fn value(self, token: &str) -> String {
        match self {
            Self::Bearer => format!("Bearer {token}"),
            Self::Basic => format!("Basic {token}"),
            Self::ApiKey | Self::ContentType | Self::Accept => token.to_string(),
        }
    }

    /// Header name and formatted value as an owned pair.
    #[must_use]
    pub fn pair(self, token: &str) -> (String, String) {
        (self.name().to_string(), self.value(token))
    }
}

impl AsRef<str> for HeaderType {
    fn as_ref(&self) -> &str {
        self.name()
    }
}
