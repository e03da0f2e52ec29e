//! Request fingerprints for use as token nonces
//!
//! A nonce must be identical for every request in one pagination sequence
//! and differ as soon as a parameter that changes the result set does. The
//! usual choice is a digest of the filter and ordering, plus the page size
//! when the caller uses page-index mode.
//!
//! Field order matters: build the fingerprint in the same order on every
//! request.

use sha2::{Digest, Sha256};
use std::fmt;

const DOMAIN: &[u8] = b"page-token:nonce:v1";

const TAG_BYTES: u8 = 0x01;
const TAG_U64: u8 = 0x02;
const TAG_PAGE_SIZE: u8 = 0x03;

/// SHA-256 fingerprint of list request parameters
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Nonce([u8; 32]);

impl Nonce {
    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Consume into the raw digest
    pub fn into_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Incrementally hashes named request parameters into a [`Nonce`]
///
/// ```
/// use page_token::NonceBuilder;
///
/// let nonce = NonceBuilder::new()
///     .field("filter", "state = ACTIVE")
///     .field("order_by", "create_time desc")
///     .finish();
/// assert_eq!(nonce.to_string().len(), 64);
/// ```
#[derive(Clone, Debug)]
pub struct NonceBuilder {
    hasher: Sha256,
}

impl Default for NonceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceBuilder {
    /// Start a new fingerprint
    pub fn new() -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN);
        Self { hasher }
    }

    /// Add a named string or byte parameter
    #[must_use]
    pub fn field(mut self, name: &str, value: impl AsRef<[u8]>) -> Self {
        self.write_name(TAG_BYTES, name);
        self.write_bytes(value.as_ref());
        self
    }

    /// Add a named integer parameter
    #[must_use]
    pub fn field_u64(mut self, name: &str, value: u64) -> Self {
        self.write_name(TAG_U64, name);
        self.hasher.update(value.to_be_bytes());
        self
    }

    /// Add the requested page size
    ///
    /// Only include this in page-index mode. Offset tokens stay valid when
    /// the page size changes between calls.
    #[must_use]
    pub fn page_size(mut self, page_size: i64) -> Self {
        self.write_name(TAG_PAGE_SIZE, "page_size");
        self.hasher.update(page_size.to_be_bytes());
        self
    }

    /// Finish hashing
    pub fn finish(self) -> Nonce {
        let digest = self.hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Nonce(out)
    }

    fn write_name(&mut self, tag: u8, name: &str) {
        self.hasher.update([tag]);
        self.write_bytes(name.as_bytes());
    }

    // Length prefix keeps ("ab", "c") and ("a", "bc") apart
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update((bytes.len() as u64).to_be_bytes());
        self.hasher.update(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_deterministic() {
        let a = NonceBuilder::new().field("filter", "x > 1").finish();
        let b = NonceBuilder::new().field("filter", "x > 1").finish();
        assert_eq!(a, b);
    }

    #[test]
    fn test_value_changes_nonce() {
        let a = NonceBuilder::new().field("filter", "x > 1").finish();
        let b = NonceBuilder::new().field("filter", "x > 2").finish();
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_boundaries() {
        let a = NonceBuilder::new().field("a", "bc").finish();
        let b = NonceBuilder::new().field("ab", "c").finish();
        assert_ne!(a, b);

        let a = NonceBuilder::new().field("f", "ab").field("g", "").finish();
        let b = NonceBuilder::new().field("f", "a").field("g", "b").finish();
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_order_matters() {
        let a = NonceBuilder::new().field("a", "1").field("b", "2").finish();
        let b = NonceBuilder::new().field("b", "2").field("a", "1").finish();
        assert_ne!(a, b);
    }

    #[test]
    fn test_typed_fields_are_distinct() {
        let a = NonceBuilder::new().field_u64("page_size", 10).finish();
        let b = NonceBuilder::new().page_size(10).finish();
        assert_ne!(a, b);

        let c = NonceBuilder::new().page_size(10).finish();
        let d = NonceBuilder::new().page_size(20).finish();
        assert_ne!(c, d);
    }

    #[test]
    fn test_empty_builder_is_not_empty_bytes() {
        let nonce = NonceBuilder::default().finish();
        assert_eq!(nonce.as_bytes().len(), 32);
        assert_ne!(nonce.into_bytes(), [0u8; 32]);
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        let nonce = NonceBuilder::new().field("filter", "").finish();
        let hex = nonce.to_string();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        assert_eq!(AsRef::<[u8]>::as_ref(&nonce), nonce.as_bytes().as_slice());
    }
}
