//! Errors raised while decoding Multikey bytes and text

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Multibase text is empty")]
    EmptyMultibase,

    #[error("Multibase marker '{0}' is not base58btc ('z')")]
    InvalidMultibasePrefix(char),

    #[error("Invalid base58btc payload: {0}")]
    InvalidBase58(String),

    #[error("Multicodec header needs 2 bytes, got {0}")]
    TruncatedHeader(usize),

    #[error("Codec 0x{0:x} does not encode to a 2-byte multicodec header")]
    CodecOutOfRange(u64),
}
