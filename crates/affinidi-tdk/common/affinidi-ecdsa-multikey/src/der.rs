//! Builds and parses the DER containers providers import keys from
//!
//! Multikey bytes hold a compressed point or a raw scalar. Providers take
//! SubjectPublicKeyInfo (public) and PKCS8 (secret) DER, which for a fixed
//! curve and fixed key widths is a constant prefix around the raw bytes.
//! No ASN.1 is parsed here and no point is checked against the curve; the
//! provider does that on import.

use zeroize::Zeroizing;

use crate::{Curve, MultikeyError, error::Result};

/// SEC1 tag of a compressed point with an even Y coordinate
pub const COMPRESSED_EVEN: u8 = 0x02;

/// SEC1 tag of a compressed point with an odd Y coordinate
pub const COMPRESSED_ODD: u8 = 0x03;

/// Builds a SubjectPublicKeyInfo from a compressed point
pub fn build_spki(curve: Curve, public_raw: &[u8]) -> Result<Vec<u8>> {
    let descriptor = curve.descriptor();
    check_public_length(curve, public_raw)?;

    let mut spki = Vec::with_capacity(descriptor.spki_prefix.len() + public_raw.len());
    spki.extend_from_slice(descriptor.spki_prefix);
    spki.extend_from_slice(public_raw);
    Ok(spki)
}

/// Builds a PKCS8 PrivateKeyInfo from a raw scalar and its compressed point
///
/// The public point is carried in the optional `[1]` field of the SEC1
/// ECPrivateKey; some providers require it to check consistency on import.
pub fn build_pkcs8(
    curve: Curve,
    secret_raw: &[u8],
    public_raw: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let descriptor = curve.descriptor();
    check_secret_length(curve, secret_raw)?;
    check_public_length(curve, public_raw)?;

    let mut pkcs8 = Zeroizing::new(Vec::with_capacity(
        descriptor.pkcs8_secret_prefix.len()
            + secret_raw.len()
            + descriptor.pkcs8_public_prefix.len()
            + public_raw.len(),
    ));
    pkcs8.extend_from_slice(descriptor.pkcs8_secret_prefix);
    pkcs8.extend_from_slice(secret_raw);
    pkcs8.extend_from_slice(descriptor.pkcs8_public_prefix);
    pkcs8.extend_from_slice(public_raw);
    Ok(pkcs8)
}

/// Compresses a point from its big-endian affine coordinates
///
/// X is left-padded with zeros to the scalar size, so the result is always
/// `scalar_size + 1` bytes. Only the last byte of Y decides the parity tag.
pub fn compress_point(curve: Curve, x: &[u8], y: &[u8]) -> Result<Vec<u8>> {
    let size = curve.descriptor().public_key_size();
    let Some(y_last) = y.last() else {
        return Err(MultikeyError::MalformedPublicKey {
            curve,
            expected: size,
            actual: 0,
        });
    };
    if x.len() >= size {
        return Err(MultikeyError::MalformedPublicKey {
            curve,
            expected: size,
            actual: x.len() + 1,
        });
    }

    let mut compressed = vec![0u8; size];
    compressed[0] = if y_last % 2 == 0 {
        COMPRESSED_EVEN
    } else {
        COMPRESSED_ODD
    };
    compressed[size - x.len()..].copy_from_slice(x);
    Ok(compressed)
}

/// Splits a SubjectPublicKeyInfo built by [`build_spki`] into curve and point
pub fn parse_spki(spki: &[u8]) -> Result<(Curve, &[u8])> {
    Curve::ALL
        .into_iter()
        .find_map(|curve| {
            let descriptor = curve.descriptor();
            spki.strip_prefix(descriptor.spki_prefix)
                .filter(|point| point.len() == descriptor.public_key_size())
                .map(|point| (curve, point))
        })
        .ok_or_else(|| {
            MultikeyError::UnrecognizedDer(format!(
                "{} bytes don't match any registered SubjectPublicKeyInfo layout",
                spki.len()
            ))
        })
}

/// Splits a PKCS8 built by [`build_pkcs8`] into curve, scalar and point
pub fn parse_pkcs8(pkcs8: &[u8]) -> Result<(Curve, &[u8], &[u8])> {
    Curve::ALL
        .into_iter()
        .find_map(|curve| {
            let descriptor = curve.descriptor();
            let rest = pkcs8.strip_prefix(descriptor.pkcs8_secret_prefix)?;
            if rest.len() < descriptor.scalar_size {
                return None;
            }
            let (secret, rest) = rest.split_at(descriptor.scalar_size);
            let public = rest
                .strip_prefix(descriptor.pkcs8_public_prefix)
                .filter(|point| point.len() == descriptor.public_key_size())?;
            Some((curve, secret, public))
        })
        .ok_or_else(|| {
            MultikeyError::UnrecognizedDer(format!(
                "{} bytes don't match any registered PKCS8 layout",
                pkcs8.len()
            ))
        })
}

fn check_public_length(curve: Curve, public_raw: &[u8]) -> Result<()> {
    let expected = curve.descriptor().public_key_size();
    if public_raw.len() != expected {
        return Err(MultikeyError::MalformedPublicKey {
            curve,
            expected,
            actual: public_raw.len(),
        });
    }
    Ok(())
}

fn check_secret_length(curve: Curve, secret_raw: &[u8]) -> Result<()> {
    let expected = curve.descriptor().scalar_size;
    if secret_raw.len() != expected {
        return Err(MultikeyError::MalformedSecretKey {
            curve,
            expected,
            actual: secret_raw.len(),
        });
    }
    Ok(())
}
