//! Token encoder and decoder

use super::types::TokenRecord;
use super::wire;
use crate::config::CodecConfig;
use crate::error::{Error, Result, TokenFormatError};
use crate::types::CursorMode;
use bytes::Bytes;
use tracing::{debug, trace};

/// Encodes cursors into page tokens and decodes them back
///
/// Holds only its configuration, so a single codec can be shared freely
/// between threads and tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCodec {
    config: CodecConfig,
}

impl TokenCodec {
    /// Create a codec with default limits for the given mode
    pub fn new(mode: CursorMode) -> Self {
        Self {
            config: CodecConfig::new(mode),
        }
    }

    /// Create an offset-accumulation codec
    pub fn offset() -> Self {
        Self::new(CursorMode::Offset)
    }

    /// Create a page-index codec
    pub fn page_index() -> Self {
        Self::new(CursorMode::PageIndex)
    }

    /// Create a codec from a config, validating it first
    pub fn with_config(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the codec configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get the cursor mode
    pub fn mode(&self) -> CursorMode {
        self.config.mode
    }

    /// Cursor to store in the token following a page served at `cursor`
    ///
    /// Offset mode returns `cursor + page_size`. Page-index mode returns
    /// `cursor + 1` and only checks that `page_size` is not negative.
    pub fn next_cursor(&self, cursor: u64, page_size: i64) -> Result<u64> {
        let page_size =
            u64::try_from(page_size).map_err(|_| Error::NegativePageSize { value: page_size })?;

        let step = match self.config.mode {
            CursorMode::Offset => page_size,
            CursorMode::PageIndex => 1,
        };
        cursor
            .checked_add(step)
            .ok_or(Error::CursorOverflow { cursor, step })
    }

    /// Encode the token for the page after the one served at `cursor`
    ///
    /// `cursor` is the value returned by [`decode`](Self::decode) for the
    /// current request, and `page_size` the number of elements requested.
    pub fn encode(&self, cursor: u64, page_size: i64, nonce: &[u8]) -> Result<String> {
        let next = self.next_cursor(cursor, page_size)?;
        self.encode_record(&TokenRecord::new(next, Bytes::copy_from_slice(nonce)))
    }

    /// [`encode`](Self::encode) for callers holding signed integers
    ///
    /// Negative values are rejected with [`Error::NegativeCursor`] or
    /// [`Error::NegativePageSize`] before anything is serialized.
    pub fn encode_signed(&self, cursor: i64, page_size: i64, nonce: &[u8]) -> Result<String> {
        let cursor = u64::try_from(cursor).map_err(|_| Error::NegativeCursor { value: cursor })?;
        self.encode(cursor, page_size, nonce)
    }

    /// Encode a record, storing its cursor verbatim
    pub fn encode_record(&self, record: &TokenRecord) -> Result<String> {
        let len = record.nonce().len();
        let nonce_len = u32::try_from(len).map_err(|_| Error::NonceTooLong {
            len,
            max: u32::MAX as usize,
        })?;

        // Never issue a token this codec would refuse to decode
        if let Some(max) = self.config.max_token_len {
            let token_len = wire::encoded_len(len);
            if token_len > max {
                return Err(Error::TokenTooLong {
                    len: token_len,
                    max,
                });
            }
        }

        let payload = wire::write_payload(self.config.mode, record, nonce_len);
        let token = wire::to_token(&payload);

        trace!(
            mode = %self.config.mode,
            cursor = record.cursor(),
            len = token.len(),
            "encoded page token"
        );
        Ok(token)
    }

    /// Decode a token into the cursor to resume from
    ///
    /// An empty token is the first page and decodes to `0`. A token issued
    /// for a different nonce fails with [`Error::ChangedParameters`]; a
    /// string this codec could not have produced fails with
    /// [`Error::InvalidToken`].
    pub fn decode(&self, token: &str, nonce: &[u8]) -> Result<u64> {
        let Some(record) = self.inspect(token)? else {
            trace!(mode = %self.config.mode, "empty page token, starting at 0");
            return Ok(0);
        };

        if !record.matches_nonce(nonce) {
            debug!(
                mode = %self.config.mode,
                cursor = record.cursor(),
                "rejecting page token: request parameters changed"
            );
            return Err(Error::ChangedParameters);
        }

        trace!(mode = %self.config.mode, cursor = record.cursor(), "decoded page token");
        Ok(record.cursor())
    }

    /// Parse a token without checking its nonce
    ///
    /// Returns `None` for the empty token.
    pub fn inspect(&self, token: &str) -> Result<Option<TokenRecord>> {
        if token.is_empty() {
            return Ok(None);
        }

        self.parse(token).map(Some).map_err(|err| {
            debug!(mode = %self.config.mode, reason = %err, "rejecting page token");
            Error::InvalidToken(err)
        })
    }

    fn parse(&self, token: &str) -> std::result::Result<TokenRecord, TokenFormatError> {
        if let Some(max) = self.config.max_token_len {
            if token.len() > max {
                return Err(TokenFormatError::TooLong {
                    len: token.len(),
                    max,
                });
            }
        }

        let payload = wire::from_token(token)?;
        wire::read_payload(self.config.mode, &payload)
    }
}
