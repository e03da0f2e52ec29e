//! Binary layout and base64 transport encoding
//!
//! ```text
//! ┌─────┬──────────────┬──────────────┬─────────────┐
//! │ tag │ cursor (u64) │ nonce_len    │ nonce       │
//! │ 1 B │ 8 B, BE      │ 4 B, BE      │ nonce_len B │
//! └─────┴──────────────┴──────────────┴─────────────┘
//! ```
//!
//! The tag identifies both the format version and the cursor mode. Nothing
//! may follow the nonce.

use super::types::TokenRecord;
use crate::error::TokenFormatError;
use crate::types::CursorMode;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use bytes::{Buf, BufMut, BytesMut};

/// Format tag for offset-accumulation tokens, version 1
pub const TAG_OFFSET_V1: u8 = 0x01;

/// Format tag for page-index tokens, version 1
pub const TAG_PAGE_INDEX_V1: u8 = 0x02;

/// Bytes preceding the nonce: tag, cursor, nonce length
pub const HEADER_LEN: usize = 1 + 8 + 4;

/// Format tag written for a mode
pub fn tag_for(mode: CursorMode) -> u8 {
    match mode {
        CursorMode::Offset => TAG_OFFSET_V1,
        CursorMode::PageIndex => TAG_PAGE_INDEX_V1,
    }
}

/// Mode identified by a format tag
pub fn mode_for(tag: u8) -> Result<CursorMode, TokenFormatError> {
    match tag {
        TAG_OFFSET_V1 => Ok(CursorMode::Offset),
        TAG_PAGE_INDEX_V1 => Ok(CursorMode::PageIndex),
        other => Err(TokenFormatError::UnknownTag(other)),
    }
}

/// Length in characters of the token for a nonce of `nonce_len` bytes
pub fn encoded_len(nonce_len: usize) -> usize {
    HEADER_LEN
        .checked_add(nonce_len)
        .and_then(|len| base64::encoded_len(len, false))
        .unwrap_or(usize::MAX)
}

/// Serialize a record. The caller has already checked the nonce fits in a `u32`.
pub(crate) fn write_payload(mode: CursorMode, record: &TokenRecord, nonce_len: u32) -> BytesMut {
    let mut buf = BytesMut::with_capacity(HEADER_LEN + record.nonce().len());
    buf.put_u8(tag_for(mode));
    buf.put_u64(record.cursor());
    buf.put_u32(nonce_len);
    buf.put_slice(record.nonce());
    buf
}

/// Parse a payload written by [`write_payload`] for the expected mode
pub(crate) fn read_payload(
    expected: CursorMode,
    payload: &[u8],
) -> Result<TokenRecord, TokenFormatError> {
    let mut buf = payload;

    ensure(buf, 1)?;
    let found = mode_for(buf.get_u8())?;
    if found != expected {
        return Err(TokenFormatError::ModeMismatch { expected, found });
    }

    ensure(buf, HEADER_LEN - 1)?;
    let cursor = buf.get_u64();
    let nonce_len = buf.get_u32() as usize;

    ensure(buf, nonce_len)?;
    let nonce = buf.copy_to_bytes(nonce_len);

    if buf.has_remaining() {
        return Err(TokenFormatError::TrailingBytes(buf.remaining()));
    }

    Ok(TokenRecord::new(cursor, nonce))
}

fn ensure(buf: &[u8], needed: usize) -> Result<(), TokenFormatError> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(TokenFormatError::Truncated { needed, remaining });
    }
    Ok(())
}

/// Encode payload bytes as an unpadded URL-safe base64 string
pub(crate) fn to_token(payload: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(payload)
}

/// Decode an unpadded URL-safe base64 string into payload bytes
pub(crate) fn from_token(token: &str) -> Result<Vec<u8>, TokenFormatError> {
    Ok(URL_SAFE_NO_PAD.decode(token)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout() {
        let record = TokenRecord::new(0x0102_0304_0506_0708, b"ab".to_vec());
        let payload = write_payload(CursorMode::PageIndex, &record, 2);

        assert_eq!(
            payload.as_ref(),
            &[0x02, 1, 2, 3, 4, 5, 6, 7, 8, 0, 0, 0, 2, b'a', b'b']
        );
    }

    #[test]
    fn test_encoded_len_matches_output() {
        for nonce_len in [0usize, 1, 2, 3, 32, 255, 1000] {
            let record = TokenRecord::new(7, vec![0xffu8; nonce_len]);
            let payload = write_payload(CursorMode::Offset, &record, nonce_len as u32);
            assert_eq!(to_token(&payload).len(), encoded_len(nonce_len));
        }
        assert_eq!(encoded_len(0), 18);
    }

    #[test]
    fn test_read_rejects_short_header() {
        let err = read_payload(CursorMode::Offset, &[0x01, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            TokenFormatError::Truncated {
                needed: 12,
                remaining: 2
            }
        ));
    }

    #[test]
    fn test_read_rejects_short_nonce() {
        let mut payload = vec![0x01, 0, 0, 0, 0, 0, 0, 0, 9, 0, 0, 0, 4];
        payload.extend_from_slice(b"ab");
        let err = read_payload(CursorMode::Offset, &payload).unwrap_err();
        assert!(matches!(
            err,
            TokenFormatError::Truncated {
                needed: 4,
                remaining: 2
            }
        ));
    }

    #[test]
    fn test_read_rejects_oversized_nonce_length() {
        let payload = [0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff];
        let err = read_payload(CursorMode::Offset, &payload).unwrap_err();
        assert!(matches!(
            err,
            TokenFormatError::Truncated {
                needed: 0xffff_ffff,
                remaining: 0
            }
        ));
    }

    #[test]
    fn test_read_rejects_trailing_bytes() {
        let record = TokenRecord::new(1, Bytes::new());
        let mut payload = write_payload(CursorMode::Offset, &record, 0).to_vec();
        payload.push(0);
        let err = read_payload(CursorMode::Offset, &payload).unwrap_err();
        assert!(matches!(err, TokenFormatError::TrailingBytes(1)));
    }

    #[test]
    fn test_mode_for_unknown_tag() {
        assert!(matches!(mode_for(0x00), Err(TokenFormatError::UnknownTag(0))));
        assert_eq!(mode_for(TAG_PAGE_INDEX_V1).unwrap(), CursorMode::PageIndex);
    }

    #[test]
    fn test_from_token_rejects_standard_alphabet() {
        assert!(matches!(
            from_token("ab+/"),
            Err(TokenFormatError::Base64(_))
        ));
        assert!(matches!(
            from_token("YQ=="),
            Err(TokenFormatError::Base64(_))
        ));
    }
}
