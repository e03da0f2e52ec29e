//! Token record
//!
//! The decoded content of a page token: where to resume, and the fingerprint
//! of the request parameters it was issued for.

use bytes::Bytes;

/// Cursor and nonce carried by a page token
///
/// Built fresh by every encode and decode call. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenRecord {
    cursor: u64,
    nonce: Bytes,
}

impl TokenRecord {
    /// Create a record
    pub fn new(cursor: u64, nonce: impl Into<Bytes>) -> Self {
        Self {
            cursor,
            nonce: nonce.into(),
        }
    }

    /// Page index or absolute offset, depending on the codec mode
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Request fingerprint the token was issued for
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// Byte-for-byte comparison against a freshly computed nonce
    pub fn matches_nonce(&self, nonce: &[u8]) -> bool {
        &self.nonce[..] == nonce
    }

    /// Split into cursor and nonce
    pub fn into_parts(self) -> (u64, Bytes) {
        (self.cursor, self.nonce)
    }
}
