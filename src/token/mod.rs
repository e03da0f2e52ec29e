//! Page token codec
//!
//! # Overview
//!
//! A page token is an opaque, URL-safe string that tells a list method where
//! to resume. It carries a cursor and the nonce of the request that produced
//! it. Decoding checks the nonce against the one recomputed for the incoming
//! request, so a client that changes its filter or ordering mid-pagination
//! gets [`Error::ChangedParameters`](crate::Error::ChangedParameters) rather
//! than a silently wrong page.
//!
//! The nonce check is an equality test, not a MAC. It catches parameter
//! drift, not forged tokens.

mod codec;
mod types;
pub mod wire;

pub use codec::TokenCodec;
pub use types::TokenRecord;
