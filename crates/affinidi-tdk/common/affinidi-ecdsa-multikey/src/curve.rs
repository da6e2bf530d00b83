//! Registry of supported curves
//!
//! Every per-curve constant lives in a single [`CurveDescriptor`] table.
//! Adding a curve is a data change: one new [`Curve`] variant and one row in
//! [`REGISTRY`].

use std::{fmt, str::FromStr};

use affinidi_multikey_encoding::{
    KeyKind, MulticodecHeader, P256_PRIV, P256_PUB, P384_PRIV, P384_PUB, P521_PRIV, P521_PUB,
    SECP256K1_PRIV, SECP256K1_PUB,
};
use serde::{Deserialize, Serialize};

use crate::{MultikeyError, error::Result};

/// Supported elliptic curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    #[serde(rename = "P-256")]
    P256,
    #[serde(rename = "P-384")]
    P384,
    #[serde(rename = "P-521")]
    P521,
    #[serde(rename = "secp256k1")]
    Secp256k1,
}

impl Curve {
    /// Every registered curve, in registry order
    pub const ALL: [Curve; 4] = [Curve::P256, Curve::P384, Curve::P521, Curve::Secp256k1];

    /// Canonical curve name (JWK `crv` / WebCrypto `namedCurve`)
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Registry entry for this curve
    pub fn descriptor(&self) -> &'static CurveDescriptor {
        match self {
            Curve::P256 => &REGISTRY[0],
            Curve::P384 => &REGISTRY[1],
            Curve::P521 => &REGISTRY[2],
            Curve::Secp256k1 => &REGISTRY[3],
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Curve {
    type Error = MultikeyError;

    fn try_from(value: &str) -> Result<Self> {
        lookup(value).map(|descriptor| descriptor.curve)
    }
}

impl FromStr for Curve {
    type Err = MultikeyError;

    fn from_str(s: &str) -> Result<Self> {
        Curve::try_from(s)
    }
}

/// Immutable per-curve encoding parameters
#[derive(Debug)]
pub struct CurveDescriptor {
    pub curve: Curve,
    pub name: &'static str,
    /// Byte length of the secret scalar
    pub scalar_size: usize,
    pub public_key_header: MulticodecHeader,
    pub secret_key_header: MulticodecHeader,
    /// DER bytes preceding the compressed point in a SubjectPublicKeyInfo
    pub spki_prefix: &'static [u8],
    /// DER bytes preceding the secret scalar in a PKCS8 PrivateKeyInfo
    pub pkcs8_secret_prefix: &'static [u8],
    /// DER bytes between the secret scalar and the compressed point in PKCS8
    pub pkcs8_public_prefix: &'static [u8],
}

impl CurveDescriptor {
    /// Compressed public point size: one parity byte plus the X coordinate
    pub const fn public_key_size(&self) -> usize {
        self.scalar_size + 1
    }

    /// Raw key size for the given half of the key pair
    pub const fn raw_key_size(&self, kind: KeyKind) -> usize {
        match kind {
            KeyKind::Public => self.public_key_size(),
            KeyKind::Secret => self.scalar_size,
        }
    }

    /// Multicodec header for the given half of the key pair
    pub const fn header(&self, kind: KeyKind) -> MulticodecHeader {
        match kind {
            KeyKind::Public => self.public_key_header,
            KeyKind::Secret => self.secret_key_header,
        }
    }
}

/*
 * DER prefixes. The layouts are:
 *
 * SPKI:  SEQUENCE { SEQUENCE { OID ecPublicKey, OID <curve> }, BIT STRING <point> }
 * PKCS8: SEQUENCE { INTEGER 0, SEQUENCE { OID ecPublicKey, OID <curve> },
 *          OCTET STRING { SEQUENCE { INTEGER 1, OCTET STRING <scalar>,
 *                                    [1] { BIT STRING <point> } } } }
 *
 * All length bytes assume a compressed point of `scalar_size + 1` bytes.
 */

// 1.2.840.10045.2.1 ecPublicKey, 1.2.840.10045.3.1.7 prime256v1
const P256_SPKI_PREFIX: [u8; 26] = [
    0x30, 0x39, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x08,
    0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x22, 0x00,
];
const P256_PKCS8_SECRET_PREFIX: [u8; 35] = [
    0x30, 0x67, 0x02, 0x01, 0x00, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02,
    0x01, 0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x04, 0x4d, 0x30, 0x4b,
    0x02, 0x01, 0x01, 0x04, 0x20,
];
const P256_PKCS8_PUBLIC_PREFIX: [u8; 5] = [0xa1, 0x24, 0x03, 0x22, 0x00];

// 1.3.132.0.34 secp384r1
const P384_SPKI_PREFIX: [u8; 23] = [
    0x30, 0x46, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
    0x2b, 0x81, 0x04, 0x00, 0x22, 0x03, 0x32, 0x00,
];
const P384_PKCS8_SECRET_PREFIX: [u8; 33] = [
    0x30, 0x81, 0x84, 0x02, 0x01, 0x00, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d,
    0x02, 0x01, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x22, 0x04, 0x6d, 0x30, 0x6b, 0x02, 0x01,
    0x01, 0x04, 0x30,
];
const P384_PKCS8_PUBLIC_PREFIX: [u8; 5] = [0xa1, 0x34, 0x03, 0x32, 0x00];

// 1.3.132.0.35 secp521r1
const P521_SPKI_PREFIX: [u8; 23] = [
    0x30, 0x58, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
    0x2b, 0x81, 0x04, 0x00, 0x23, 0x03, 0x44, 0x00,
];
const P521_PKCS8_SECRET_PREFIX: [u8; 35] = [
    0x30, 0x81, 0xaa, 0x02, 0x01, 0x00, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d,
    0x02, 0x01, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x23, 0x04, 0x81, 0x92, 0x30, 0x81, 0x8f,
    0x02, 0x01, 0x01, 0x04, 0x42,
];
const P521_PKCS8_PUBLIC_PREFIX: [u8; 5] = [0xa1, 0x46, 0x03, 0x44, 0x00];

// 1.3.132.0.10 secp256k1
const SECP256K1_SPKI_PREFIX: [u8; 23] = [
    0x30, 0x36, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
    0x2b, 0x81, 0x04, 0x00, 0x0a, 0x03, 0x22, 0x00,
];
const SECP256K1_PKCS8_SECRET_PREFIX: [u8; 32] = [
    0x30, 0x64, 0x02, 0x01, 0x00, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02,
    0x01, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, 0x04, 0x4d, 0x30, 0x4b, 0x02, 0x01, 0x01,
    0x04, 0x20,
];
const SECP256K1_PKCS8_PUBLIC_PREFIX: [u8; 5] = [0xa1, 0x24, 0x03, 0x22, 0x00];

/// The curve table. Order matches [`Curve::ALL`].
pub static REGISTRY: [CurveDescriptor; 4] = [
    CurveDescriptor {
        curve: Curve::P256,
        name: "P-256",
        scalar_size: 32,
        public_key_header: MulticodecHeader::from_codec(P256_PUB),
        secret_key_header: MulticodecHeader::from_codec(P256_PRIV),
        spki_prefix: &P256_SPKI_PREFIX,
        pkcs8_secret_prefix: &P256_PKCS8_SECRET_PREFIX,
        pkcs8_public_prefix: &P256_PKCS8_PUBLIC_PREFIX,
    },
    CurveDescriptor {
        curve: Curve::P384,
        name: "P-384",
        scalar_size: 48,
        public_key_header: MulticodecHeader::from_codec(P384_PUB),
        secret_key_header: MulticodecHeader::from_codec(P384_PRIV),
        spki_prefix: &P384_SPKI_PREFIX,
        pkcs8_secret_prefix: &P384_PKCS8_SECRET_PREFIX,
        pkcs8_public_prefix: &P384_PKCS8_PUBLIC_PREFIX,
    },
    CurveDescriptor {
        curve: Curve::P521,
        name: "P-521",
        scalar_size: 66,
        public_key_header: MulticodecHeader::from_codec(P521_PUB),
        secret_key_header: MulticodecHeader::from_codec(P521_PRIV),
        spki_prefix: &P521_SPKI_PREFIX,
        pkcs8_secret_prefix: &P521_PKCS8_SECRET_PREFIX,
        pkcs8_public_prefix: &P521_PKCS8_PUBLIC_PREFIX,
    },
    CurveDescriptor {
        curve: Curve::Secp256k1,
        name: "secp256k1",
        scalar_size: 32,
        public_key_header: MulticodecHeader::from_codec(SECP256K1_PUB),
        secret_key_header: MulticodecHeader::from_codec(SECP256K1_PRIV),
        spki_prefix: &SECP256K1_SPKI_PREFIX,
        pkcs8_secret_prefix: &SECP256K1_PKCS8_SECRET_PREFIX,
        pkcs8_public_prefix: &SECP256K1_PKCS8_PUBLIC_PREFIX,
    },
];

/// Looks up a curve by its canonical name
pub fn lookup(name: &str) -> Result<&'static CurveDescriptor> {
    REGISTRY
        .iter()
        .find(|descriptor| descriptor.name == name)
        .ok_or_else(|| MultikeyError::UnsupportedCurve(name.to_string()))
}

/// Resolves a header to the curve and key kind it was registered for
pub fn resolve_header(header: &MulticodecHeader) -> Option<(Curve, KeyKind)> {
    REGISTRY.iter().find_map(|descriptor| {
        [KeyKind::Public, KeyKind::Secret]
            .into_iter()
            .find(|kind| descriptor.header(*kind) == *header)
            .map(|kind| (descriptor.curve, kind))
    })
}
