//! Multicodec headers for Multikey key material
//!
//! Multicodec prefixes data with an unsigned varint naming the type of data
//! that follows. Every code point used for Multikey values lies in
//! `0x80..0x4000`, so its varint is always exactly two bytes. The headers are
//! computed once at compile time and handled at runtime as 2-byte literals.
//!
//! See: <https://github.com/multiformats/multicodec>

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EncodingError;

// ****************************************************************************
// Codec Magic Numbers
// See: https://github.com/multiformats/multicodec/blob/master/table.csv
// ****************************************************************************
pub const SECP256K1_PUB: u64 = 0xe7;
pub const SECP256K1_PRIV: u64 = 0x1301;
pub const P256_PUB: u64 = 0x1200;
pub const P256_PRIV: u64 = 0x1306;
pub const P384_PUB: u64 = 0x1201;
pub const P384_PRIV: u64 = 0x1307;
pub const P521_PUB: u64 = 0x1202;
pub const P521_PRIV: u64 = 0x1308;

/// Byte length of every Multikey multicodec header
pub const HEADER_LENGTH: usize = 2;

/// Which half of a key pair a header describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    Public,
    Secret,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyKind::Public => write!(f, "public"),
            KeyKind::Secret => write!(f, "secret"),
        }
    }
}

/// The fixed 2-byte multicodec header that precedes raw key bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MulticodecHeader([u8; HEADER_LENGTH]);

impl MulticodecHeader {
    /// Computes the 2-byte unsigned-varint header for a codec value.
    ///
    /// Meant for `const` tables, where a codec outside `0x80..0x4000` is a
    /// compile error. Runtime callers should use [`Self::try_from_codec`].
    pub const fn from_codec(codec: u64) -> Self {
        match two_byte_varint(codec) {
            Some(bytes) => MulticodecHeader(bytes),
            None => panic!("codec does not encode to a 2-byte varint"),
        }
    }

    /// Computes the header for a codec value known only at runtime
    pub fn try_from_codec(codec: u64) -> Result<Self, EncodingError> {
        two_byte_varint(codec)
            .map(MulticodecHeader)
            .ok_or(EncodingError::CodecOutOfRange(codec))
    }

    /// Wraps two literal header bytes
    pub const fn from_bytes(bytes: [u8; HEADER_LENGTH]) -> Self {
        MulticodecHeader(bytes)
    }

    /// Reads the header from the first two bytes of a multikey buffer
    pub fn read(bytes: &[u8]) -> Result<Self, EncodingError> {
        match bytes {
            [b0, b1, ..] => Ok(MulticodecHeader([*b0, *b1])),
            _ => Err(EncodingError::TruncatedHeader(bytes.len())),
        }
    }

    /// Writes the header into `buffer` at `offset`
    ///
    /// Panics if the buffer can't hold two bytes at `offset`.
    pub fn write(&self, buffer: &mut [u8], offset: usize) {
        buffer[offset..offset + HEADER_LENGTH].copy_from_slice(&self.0);
    }

    /// Raw header bytes
    pub fn as_bytes(&self) -> &[u8; HEADER_LENGTH] {
        &self.0
    }

    /// Decodes the header as a varint codec value, if it is a valid varint
    pub fn codec(&self) -> Option<u64> {
        match unsigned_varint::decode::u64(&self.0) {
            Ok((codec, [])) => Some(codec),
            _ => None,
        }
    }
}

const fn two_byte_varint(codec: u64) -> Option<[u8; HEADER_LENGTH]> {
    if codec >= 0x80 && codec < 0x4000 {
        Some([(codec & 0x7f) as u8 | 0x80, (codec >> 7) as u8])
    } else {
        None
    }
}

impl fmt::Display for MulticodecHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [high, low] = self.0;
        match self.codec() {
            Some(codec) => write!(f, "0x{high:02x}{low:02x} (codec 0x{codec:x})"),
            None => write!(f, "0x{high:02x}{low:02x}"),
        }
    }
}
