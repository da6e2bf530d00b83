//! Multibase and multicodec encoding utilities for Multikey key material
//!
//! This crate provides the curve-agnostic encoding primitives:
//! - Multibase text encoding/decoding (base58btc only)
//! - Multicodec code points and their fixed 2-byte headers

pub mod multibase;
pub mod multicodec;

pub use multibase::{BASE58BTC_PREFIX, decode_base58btc, encode_base58btc};
pub use multicodec::{
    HEADER_LENGTH, KeyKind, MulticodecHeader, P256_PRIV, P256_PUB, P384_PRIV, P384_PUB,
    P521_PRIV, P521_PUB, SECP256K1_PRIV, SECP256K1_PUB,
};

mod error;
pub use error::EncodingError;
