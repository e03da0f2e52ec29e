//! Error types for page-token
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::CursorMode;
use thiserror::Error;

/// The main error type for page-token
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Decode Errors (client input)
    // ============================================================================
    /// The token string was not produced by this codec
    #[error("Invalid page token: {0}")]
    InvalidToken(#[from] TokenFormatError),

    /// The token is well-formed but was issued for different request parameters
    #[error("Pagination parameters changed since the page token was issued")]
    ChangedParameters,

    // ============================================================================
    // Encode Errors
    // ============================================================================
    /// A signed cursor was below zero
    #[error("Negative cursor: {value}")]
    NegativeCursor { value: i64 },

    /// A page size was below zero
    #[error("Negative page size: {value}")]
    NegativePageSize { value: i64 },

    /// Advancing the cursor would pass `u64::MAX`
    #[error("Cursor overflow: {cursor} + {step} does not fit in u64")]
    CursorOverflow { cursor: u64, step: u64 },

    /// The nonce length does not fit the 32-bit length field
    #[error("Nonce of {len} bytes exceeds limit of {max} bytes")]
    NonceTooLong { len: usize, max: usize },

    /// The token would exceed the configured `max_token_len`
    #[error("Token of {len} characters exceeds configured limit of {max}")]
    TokenTooLong { len: usize, max: usize },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid codec configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Malformed YAML config
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Malformed JSON config
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error was caused by the request rather than the server.
    ///
    /// List handlers should map these to an invalid-argument response.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidToken(_)
                | Error::ChangedParameters
                | Error::NegativeCursor { .. }
                | Error::NegativePageSize { .. }
        )
    }

    /// Check if this error means the token could not be parsed at all
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Error::InvalidToken(_))
    }
}

/// Structural reasons a token string failed to parse
#[derive(Error, Debug)]
pub enum TokenFormatError {
    /// Not URL-safe unpadded base64
    #[error("not URL-safe base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Longer than the configured `max_token_len`
    #[error("token is {len} characters, limit is {max}")]
    TooLong { len: usize, max: usize },

    /// The payload ended before a field it declares
    #[error("payload truncated: needed {needed} more bytes, {remaining} left")]
    Truncated { needed: usize, remaining: usize },

    /// The leading tag byte names no known format
    #[error("unknown format tag 0x{0:02x}")]
    UnknownTag(u8),

    /// The tag belongs to the other cursor mode
    #[error("token was issued in {found} mode, expected {expected}")]
    ModeMismatch {
        expected: CursorMode,
        found: CursorMode,
    },

    /// Bytes left over after the nonce
    #[error("{0} unexpected bytes after payload")]
    TrailingBytes(usize),
}

/// Result type alias for page-token
pub type Result<T> = std::result::Result<T, Error>;
