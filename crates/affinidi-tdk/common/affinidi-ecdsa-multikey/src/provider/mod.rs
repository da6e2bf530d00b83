//! The cryptographic provider consumed by the codec
//!
//! The codec never touches curve arithmetic. Key generation, coordinate
//! export, DER import, signing and verification all go through a
//! [`Provider`], passed explicitly to the serializer and parser.

use std::fmt;

use zeroize::Zeroizing;

use crate::Curve;

mod rustcrypto;

pub use rustcrypto::{EcPublicKey, EcSecretKey, RustCryptoError, RustCryptoProvider};

/// A provider-owned key object that knows its curve
pub trait KeyHandle {
    fn curve(&self) -> Curve;
}

/// Big-endian affine coordinates of a public point
///
/// Providers may return coordinates without leading zero bytes; the codec
/// pads them back to the curve's fixed width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicCoordinates {
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}

/// Asymmetric-cryptography capabilities the codec relies on
pub trait Provider {
    type PublicKey: KeyHandle + Clone + fmt::Debug;
    type SecretKey: KeyHandle + Clone;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generates a fresh key pair on `curve`
    fn generate_key_pair(
        &self,
        curve: Curve,
    ) -> Result<(Self::PublicKey, Self::SecretKey), Self::Error>;

    /// Exports the affine (X, Y) coordinates of a public key
    fn export_public_coordinates(
        &self,
        key: &Self::PublicKey,
    ) -> Result<PublicCoordinates, Self::Error>;

    /// Exports the big-endian secret scalar
    fn export_secret_scalar(&self, key: &Self::SecretKey)
    -> Result<Zeroizing<Vec<u8>>, Self::Error>;

    /// Imports a DER SubjectPublicKeyInfo
    fn import_public_key(&self, spki: &[u8], curve: Curve) -> Result<Self::PublicKey, Self::Error>;

    /// Imports a DER PKCS8 PrivateKeyInfo
    fn import_secret_key(&self, pkcs8: &[u8], curve: Curve)
    -> Result<Self::SecretKey, Self::Error>;

    /// ECDSA-signs `message` with the curve's hash
    fn sign(&self, key: &Self::SecretKey, message: &[u8]) -> Result<Vec<u8>, Self::Error>;

    /// Verifies an ECDSA signature produced by [`Provider::sign`]
    fn verify(
        &self,
        key: &Self::PublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, Self::Error>;
}
