//! ECDSA Multikey codec for Affinidi TDK
//!
//! Moves NIST P-256/P-384/P-521 and secp256k1 key pairs between:
//! - Multikey text (`z` + base58btc of a 2-byte multicodec header and raw key bytes)
//! - raw fixed-width key material (compressed public point, secret scalar)
//! - the SubjectPublicKeyInfo/PKCS8 DER containers a [`Provider`] imports
//!
//! All curve math (generation, decompression, ECDSA) is delegated to the
//! [`Provider`]. [`RustCryptoProvider`] is the default implementation.

pub mod curve;
pub mod der;
pub mod header;
pub mod key_pair;
pub mod parse;
pub mod provider;
pub mod serialize;
pub mod signer;

mod error;

pub use curve::{Curve, CurveDescriptor};
pub use error::{MultikeyError, Result};
pub use key_pair::{EcdsaMultikey, KeyMaterial, RawKeyPair};
pub use parse::MultikeyParser;
pub use provider::{KeyHandle, Provider, PublicCoordinates, RustCryptoProvider};
pub use serialize::{ExportOptions, MultikeyPair, MultikeySerializer};
pub use signer::{Signer, Verifier};

pub use affinidi_multikey_encoding::{KeyKind, MulticodecHeader};

/// JSON property carrying the public Multikey text
pub const PUBLIC_KEY_FIELD: &str = "publicKeyMultibase";

/// JSON property carrying the secret Multikey text
pub const SECRET_KEY_FIELD: &str = "secretKeyMultibase";
