use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Display;

/// Length of a digest-derived identifier in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// The lookup key of a URL mapping.
///
/// Identifiers produced by [`Identifier::digest`] are the lowercase hex
/// SHA-256 of the URL bytes. Identifiers taken from a request path are kept
/// verbatim: they are opaque lookup keys and are never validated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Computes the identifier of `url`.
    ///
    /// The hash covers the exact byte sequence of `url`; no trimming,
    /// case-folding or scheme defaulting happens first.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashlink_core::Identifier;
    ///
    /// let id = Identifier::digest("https://example.com");
    /// assert_eq!(id.as_str().len(), 64);
    /// assert!(id.as_str().starts_with("100680ad"));
    /// ```
    pub fn digest(url: &str) -> Self {
        let digest = Sha256::digest(url.as_bytes());
        Self(hex::encode(digest))
    }

    /// Wraps a caller-supplied identifier without any validation.
    pub fn from_path(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier has the shape of a SHA-256 hex digest.
    ///
    /// Lookups never depend on this; it only tags log lines.
    pub fn is_digest_shaped(&self) -> bool {
        self.0.len() == DIGEST_HEX_LEN
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
