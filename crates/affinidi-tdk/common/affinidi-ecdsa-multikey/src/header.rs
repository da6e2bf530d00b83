//! Reads and writes the 2-byte multicodec header of Multikey bytes

use affinidi_multikey_encoding::{HEADER_LENGTH, KeyKind, MulticodecHeader};

use crate::{Curve, MultikeyError, curve, error::Result};

/// Writes the header for `(curve, kind)` into `buffer` at `offset`
///
/// Panics if `buffer` has fewer than `offset + 2` bytes.
pub fn write_header(buffer: &mut [u8], offset: usize, curve: Curve, kind: KeyKind) {
    curve.descriptor().header(kind).write(buffer, offset);
}

/// Resolves the curve and key kind from the first two bytes of `bytes`
///
/// `field` names the value being decoded, for error reporting.
pub fn read_header_kind(bytes: &[u8], field: &'static str) -> Result<(Curve, KeyKind)> {
    let header = MulticodecHeader::read(bytes).map_err(|e| {
        MultikeyError::UnsupportedMultikeyHeader {
            field,
            header: e.to_string(),
        }
    })?;

    curve::resolve_header(&header).ok_or_else(|| MultikeyError::UnsupportedMultikeyHeader {
        field,
        header: header.to_string(),
    })
}

/// Splits Multikey bytes into the header-resolved curve/kind and the raw key
pub fn split_multikey<'a>(
    bytes: &'a [u8],
    field: &'static str,
) -> Result<(Curve, KeyKind, &'a [u8])> {
    let (curve, kind) = read_header_kind(bytes, field)?;
    Ok((curve, kind, &bytes[HEADER_LENGTH..]))
}
