//! Multibase text form of Multikey bytes
//!
//! A multibase string names its alphabet with its first character. Multikey
//! only ever uses base58btc (`z`); every other marker is an error here.
//!
//! See: <https://github.com/multiformats/multibase>

use crate::EncodingError;

/// Marker character of base58btc multibase text
pub const BASE58BTC_PREFIX: char = 'z';

/// Strips the `z` marker from `text` and base58btc-decodes the rest
pub fn decode_base58btc(text: &str) -> Result<Vec<u8>, EncodingError> {
    let mut chars = text.chars();
    match chars.next() {
        None => Err(EncodingError::EmptyMultibase),
        Some(BASE58BTC_PREFIX) => bs58::decode(chars.as_str())
            .into_vec()
            .map_err(|e| EncodingError::InvalidBase58(e.to_string())),
        Some(marker) => Err(EncodingError::InvalidMultibasePrefix(marker)),
    }
}

/// Base58btc-encodes `bytes` behind the `z` marker
pub fn encode_base58btc(bytes: &[u8]) -> String {
    let mut text = String::from(BASE58BTC_PREFIX);
    text.push_str(&bs58::encode(bytes).into_string());
    text
}
