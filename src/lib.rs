//! # page-token
//!
//! Opaque `next_page_token` encoding for paginated list APIs, following
//! [AIP-158](https://google.aip.dev/158).
//!
//! A list method decodes the incoming `page_token` into a cursor, runs its
//! query from that cursor, and encodes the cursor for the following page
//! into the response's `next_page_token`. Each token embeds a nonce, a
//! fingerprint of the request parameters that shape the result set. A
//! token replayed with different parameters is rejected with
//! [`Error::ChangedParameters`].
//!
//! ## Features
//!
//! - **Offset mode**: tokens carry an absolute element offset, so the page
//!   size may change between calls
//! - **Page-index mode**: tokens carry the next page number
//! - **Versioned wire format**: a format tag keeps tokens from one mode from
//!   being misread by the other
//! - **Request fingerprints**: [`NonceBuilder`] hashes filter and ordering
//!   parameters with SHA-256
//!
//! ## Quick Start
//!
//! ```rust
//! use page_token::{decode, encode, NonceBuilder};
//!
//! # fn main() -> page_token::Result<()> {
//! let nonce = NonceBuilder::new().field("filter", "a query expression").finish();
//!
//! // First request: no token yet
//! let offset = decode("", nonce.as_ref())?;
//! assert_eq!(offset, 0);
//!
//! // ... query `page_size` rows starting at `offset` ...
//! let next_page_token = encode(offset, 10, nonce.as_ref())?;
//!
//! // Second request echoes the token with the same parameters
//! let offset = decode(&next_page_token, nonce.as_ref())?;
//! assert_eq!(offset, 10);
//! # Ok(())
//! # }
//! ```
//!
//! ## Security
//!
//! The nonce is compared for equality only. It is not a MAC: it detects a
//! client changing parameters mid-pagination, not a forged token. Do not
//! treat a decoded cursor as authorization to read anything.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Codec configuration
pub mod config;

/// Token record, wire format and codec
pub mod token;

/// Request fingerprints
pub mod nonce;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::CodecConfig;
pub use error::{Error, Result, TokenFormatError};
pub use nonce::{Nonce, NonceBuilder};
pub use token::{TokenCodec, TokenRecord};
pub use types::CursorMode;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Default codec shortcuts
// ============================================================================

/// Encode the token for the page after `page_size` elements served from
/// `offset`, in offset mode with the default config
pub fn encode(offset: u64, page_size: i64, nonce: &[u8]) -> Result<String> {
    TokenCodec::offset().encode(offset, page_size, nonce)
}

/// Decode an offset-mode token. The empty token decodes to `0`.
pub fn decode(token: &str, nonce: &[u8]) -> Result<u64> {
    TokenCodec::offset().decode(token, nonce)
}

/// Encode the token for the page after `page`, in page-index mode
pub fn encode_page(page: u64, nonce: &[u8]) -> Result<String> {
    TokenCodec::page_index().encode(page, 0, nonce)
}

/// Decode a page-index token. The empty token decodes to page `0`.
pub fn decode_page(token: &str, nonce: &[u8]) -> Result<u64> {
    TokenCodec::page_index().decode(token, nonce)
}
