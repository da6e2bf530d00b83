//! Default [`Provider`] backed by the RustCrypto elliptic-curve crates
//!
//! Each curve backend is behind its own Cargo feature (`p256`, `p384`,
//! `p521`, `k256`). Requests for a curve whose feature is disabled fail with
//! [`RustCryptoError::CurveNotEnabled`].

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

use super::{KeyHandle, Provider, PublicCoordinates};
use crate::Curve;

#[derive(Error, Debug)]
pub enum RustCryptoError {
    #[error("{0} support isn't enabled in this build")]
    CurveNotEnabled(Curve),

    #[error("{curve} public key rejected: {reason}")]
    InvalidPublicKey { curve: Curve, reason: String },

    #[error("{curve} secret key rejected: {reason}")]
    InvalidSecretKey { curve: Curve, reason: String },

    #[error("{curve} signing failed: {reason}")]
    Signing { curve: Curve, reason: String },
}

/// Generates the per-curve backend functions. Every curve crate exposes the
/// same `PublicKey`/`SecretKey`/`ecdsa` API, so one body covers all of them.
/// The ECDSA digest is the one each crate binds to its curve.
macro_rules! ecdsa_backend {
    ($module:ident, $krate:ident, $curve:expr) => {
        mod $module {
            use ::$krate::{
                PublicKey, SecretKey,
                ecdsa::{
                    Signature, SigningKey, VerifyingKey,
                    signature::{Signer, Verifier},
                },
                elliptic_curve::sec1::ToEncodedPoint,
                pkcs8::{DecodePrivateKey, DecodePublicKey},
            };
            use rand::rngs::OsRng;
            use zeroize::Zeroizing;

            use super::{PublicCoordinates, RustCryptoError};
            use crate::Curve;

            const CURVE: Curve = $curve;

            pub(super) fn generate() -> (PublicKey, SecretKey) {
                let secret = SecretKey::random(&mut OsRng);
                (secret.public_key(), secret)
            }

            pub(super) fn coordinates(
                key: &PublicKey,
            ) -> Result<PublicCoordinates, RustCryptoError> {
                let point = key.to_encoded_point(false);
                match (point.x(), point.y()) {
                    (Some(x), Some(y)) => Ok(PublicCoordinates {
                        x: x.to_vec(),
                        y: y.to_vec(),
                    }),
                    _ => Err(RustCryptoError::InvalidPublicKey {
                        curve: CURVE,
                        reason: "point has no affine coordinates".into(),
                    }),
                }
            }

            pub(super) fn scalar(key: &SecretKey) -> Zeroizing<Vec<u8>> {
                Zeroizing::new(key.to_bytes().to_vec())
            }

            pub(super) fn import_spki(spki: &[u8]) -> Result<PublicKey, RustCryptoError> {
                PublicKey::from_public_key_der(spki).map_err(public_key_error)
            }

            pub(super) fn import_pkcs8(pkcs8: &[u8]) -> Result<SecretKey, RustCryptoError> {
                SecretKey::from_pkcs8_der(pkcs8).map_err(secret_key_error)
            }

            pub(super) fn sign(
                key: &SecretKey,
                message: &[u8],
            ) -> Result<Vec<u8>, RustCryptoError> {
                let signing_key =
                    SigningKey::from_slice(&key.to_bytes()).map_err(secret_key_error)?;
                let signature: Signature = signing_key.try_sign(message).map_err(signing_error)?;
                Ok(signature.to_bytes().to_vec())
            }

            pub(super) fn verify(
                key: &PublicKey,
                message: &[u8],
                signature: &[u8],
            ) -> Result<bool, RustCryptoError> {
                let point = key.to_encoded_point(false);
                let verifying_key =
                    VerifyingKey::from_sec1_bytes(point.as_bytes()).map_err(public_key_error)?;
                // A signature of the wrong shape can't be valid
                let Ok(signature) = Signature::from_slice(signature) else {
                    return Ok(false);
                };
                Ok(verifying_key.verify(message, &signature).is_ok())
            }

            fn public_key_error(error: impl ToString) -> RustCryptoError {
                RustCryptoError::InvalidPublicKey {
                    curve: CURVE,
                    reason: error.to_string(),
                }
            }

            fn secret_key_error(error: impl ToString) -> RustCryptoError {
                RustCryptoError::InvalidSecretKey {
                    curve: CURVE,
                    reason: error.to_string(),
                }
            }

            fn signing_error(error: impl ToString) -> RustCryptoError {
                RustCryptoError::Signing {
                    curve: CURVE,
                    reason: error.to_string(),
                }
            }
        }
    };
}

#[cfg(not(any(feature = "p256", feature = "p384", feature = "p521", feature = "k256")))]
compile_error!("at least one of the `p256`, `p384`, `p521` or `k256` features must be enabled");

#[cfg(feature = "p256")]
ecdsa_backend!(nistp256, p256, Curve::P256);
#[cfg(feature = "p384")]
ecdsa_backend!(nistp384, p384, Curve::P384);
#[cfg(feature = "p521")]
ecdsa_backend!(nistp521, p521, Curve::P521);
#[cfg(feature = "k256")]
ecdsa_backend!(secp256k1, k256, Curve::Secp256k1);

/// Public key handle of the RustCrypto provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcPublicKey {
    #[cfg(feature = "p256")]
    P256(::p256::PublicKey),
    #[cfg(feature = "p384")]
    P384(::p384::PublicKey),
    #[cfg(feature = "p521")]
    P521(::p521::PublicKey),
    #[cfg(feature = "k256")]
    Secp256k1(::k256::PublicKey),
}

impl KeyHandle for EcPublicKey {
    fn curve(&self) -> Curve {
        match self {
            #[cfg(feature = "p256")]
            EcPublicKey::P256(_) => Curve::P256,
            #[cfg(feature = "p384")]
            EcPublicKey::P384(_) => Curve::P384,
            #[cfg(feature = "p521")]
            EcPublicKey::P521(_) => Curve::P521,
            #[cfg(feature = "k256")]
            EcPublicKey::Secp256k1(_) => Curve::Secp256k1,
        }
    }
}

/// Secret key handle of the RustCrypto provider. Zeroized on drop.
#[derive(Clone)]
pub enum EcSecretKey {
    #[cfg(feature = "p256")]
    P256(::p256::SecretKey),
    #[cfg(feature = "p384")]
    P384(::p384::SecretKey),
    #[cfg(feature = "p521")]
    P521(::p521::SecretKey),
    #[cfg(feature = "k256")]
    Secp256k1(::k256::SecretKey),
}

impl KeyHandle for EcSecretKey {
    fn curve(&self) -> Curve {
        match self {
            #[cfg(feature = "p256")]
            EcSecretKey::P256(_) => Curve::P256,
            #[cfg(feature = "p384")]
            EcSecretKey::P384(_) => Curve::P384,
            #[cfg(feature = "p521")]
            EcSecretKey::P521(_) => Curve::P521,
            #[cfg(feature = "k256")]
            EcSecretKey::Secp256k1(_) => Curve::Secp256k1,
        }
    }
}

impl fmt::Debug for EcSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EcSecretKey({})", self.curve())
    }
}

/// Stateless provider over the RustCrypto `p256`, `p384`, `p521` and `k256` crates
#[derive(Debug, Default, Clone, Copy)]
pub struct RustCryptoProvider;

impl Provider for RustCryptoProvider {
    type PublicKey = EcPublicKey;
    type SecretKey = EcSecretKey;
    type Error = RustCryptoError;

    fn generate_key_pair(&self, curve: Curve) -> Result<(EcPublicKey, EcSecretKey), Self::Error> {
        match curve {
            #[cfg(feature = "p256")]
            Curve::P256 => {
                let (public, secret) = nistp256::generate();
                Ok((EcPublicKey::P256(public), EcSecretKey::P256(secret)))
            }
            #[cfg(feature = "p384")]
            Curve::P384 => {
                let (public, secret) = nistp384::generate();
                Ok((EcPublicKey::P384(public), EcSecretKey::P384(secret)))
            }
            #[cfg(feature = "p521")]
            Curve::P521 => {
                let (public, secret) = nistp521::generate();
                Ok((EcPublicKey::P521(public), EcSecretKey::P521(secret)))
            }
            #[cfg(feature = "k256")]
            Curve::Secp256k1 => {
                let (public, secret) = secp256k1::generate();
                Ok((
                    EcPublicKey::Secp256k1(public),
                    EcSecretKey::Secp256k1(secret),
                ))
            }
            #[allow(unreachable_patterns)]
            other => Err(RustCryptoError::CurveNotEnabled(other)),
        }
    }

    fn export_public_coordinates(
        &self,
        key: &EcPublicKey,
    ) -> Result<PublicCoordinates, Self::Error> {
        match key {
            #[cfg(feature = "p256")]
            EcPublicKey::P256(key) => nistp256::coordinates(key),
            #[cfg(feature = "p384")]
            EcPublicKey::P384(key) => nistp384::coordinates(key),
            #[cfg(feature = "p521")]
            EcPublicKey::P521(key) => nistp521::coordinates(key),
            #[cfg(feature = "k256")]
            EcPublicKey::Secp256k1(key) => secp256k1::coordinates(key),
        }
    }

    fn export_secret_scalar(&self, key: &EcSecretKey) -> Result<Zeroizing<Vec<u8>>, Self::Error> {
        Ok(match key {
            #[cfg(feature = "p256")]
            EcSecretKey::P256(key) => nistp256::scalar(key),
            #[cfg(feature = "p384")]
            EcSecretKey::P384(key) => nistp384::scalar(key),
            #[cfg(feature = "p521")]
            EcSecretKey::P521(key) => nistp521::scalar(key),
            #[cfg(feature = "k256")]
            EcSecretKey::Secp256k1(key) => secp256k1::scalar(key),
        })
    }

    fn import_public_key(&self, spki: &[u8], curve: Curve) -> Result<EcPublicKey, Self::Error> {
        match curve {
            #[cfg(feature = "p256")]
            Curve::P256 => nistp256::import_spki(spki).map(EcPublicKey::P256),
            #[cfg(feature = "p384")]
            Curve::P384 => nistp384::import_spki(spki).map(EcPublicKey::P384),
            #[cfg(feature = "p521")]
            Curve::P521 => nistp521::import_spki(spki).map(EcPublicKey::P521),
            #[cfg(feature = "k256")]
            Curve::Secp256k1 => secp256k1::import_spki(spki).map(EcPublicKey::Secp256k1),
            #[allow(unreachable_patterns)]
            other => Err(RustCryptoError::CurveNotEnabled(other)),
        }
    }

    fn import_secret_key(&self, pkcs8: &[u8], curve: Curve) -> Result<EcSecretKey, Self::Error> {
        match curve {
            #[cfg(feature = "p256")]
            Curve::P256 => nistp256::import_pkcs8(pkcs8).map(EcSecretKey::P256),
            #[cfg(feature = "p384")]
            Curve::P384 => nistp384::import_pkcs8(pkcs8).map(EcSecretKey::P384),
            #[cfg(feature = "p521")]
            Curve::P521 => nistp521::import_pkcs8(pkcs8).map(EcSecretKey::P521),
            #[cfg(feature = "k256")]
            Curve::Secp256k1 => secp256k1::import_pkcs8(pkcs8).map(EcSecretKey::Secp256k1),
            #[allow(unreachable_patterns)]
            other => Err(RustCryptoError::CurveNotEnabled(other)),
        }
    }

    fn sign(&self, key: &EcSecretKey, message: &[u8]) -> Result<Vec<u8>, Self::Error> {
        match key {
            #[cfg(feature = "p256")]
            EcSecretKey::P256(key) => nistp256::sign(key, message),
            #[cfg(feature = "p384")]
            EcSecretKey::P384(key) => nistp384::sign(key, message),
            #[cfg(feature = "p521")]
            EcSecretKey::P521(key) => nistp521::sign(key, message),
            #[cfg(feature = "k256")]
            EcSecretKey::Secp256k1(key) => secp256k1::sign(key, message),
        }
    }

    fn verify(
        &self,
        key: &EcPublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, Self::Error> {
        match key {
            #[cfg(feature = "p256")]
            EcPublicKey::P256(key) => nistp256::verify(key, message, signature),
            #[cfg(feature = "p384")]
            EcPublicKey::P384(key) => nistp384::verify(key, message, signature),
            #[cfg(feature = "p521")]
            EcPublicKey::P521(key) => nistp521::verify(key, message, signature),
            #[cfg(feature = "k256")]
            EcPublicKey::Secp256k1(key) => secp256k1::verify(key, message, signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der;

    #[test]
    fn generate_reports_curve() {
        let provider = RustCryptoProvider;
        for curve in Curve::ALL {
            let (public, secret) = provider.generate_key_pair(curve).unwrap();
            assert_eq!(public.curve(), curve);
            assert_eq!(secret.curve(), curve);
        }
    }

    #[test]
    fn exports_are_fixed_width() {
        let provider = RustCryptoProvider;
        for curve in Curve::ALL {
            let size = curve.descriptor().scalar_size;
            let (public, secret) = provider.generate_key_pair(curve).unwrap();
            let coordinates = provider.export_public_coordinates(&public).unwrap();
            assert_eq!(coordinates.x.len(), size);
            assert_eq!(coordinates.y.len(), size);
            assert_eq!(provider.export_secret_scalar(&secret).unwrap().len(), size);
        }
    }

    #[test]
    fn import_rejects_point_off_curve() {
        let provider = RustCryptoProvider;
        // X = 1 has no matching Y on P-256
        let mut point = [0u8; 33];
        point[0] = der::COMPRESSED_EVEN;
        point[32] = 1;
        let spki = der::build_spki(Curve::P256, &point).unwrap();
        assert!(matches!(
            provider.import_public_key(&spki, Curve::P256),
            Err(RustCryptoError::InvalidPublicKey {
                curve: Curve::P256,
                ..
            })
        ));
    }

    #[test]
    fn import_rejects_other_curve_oid() {
        let provider = RustCryptoProvider;
        let (public, _) = provider.generate_key_pair(Curve::P256).unwrap();
        let coordinates = provider.export_public_coordinates(&public).unwrap();
        let point = der::compress_point(Curve::P256, &coordinates.x, &coordinates.y).unwrap();
        let spki = der::build_spki(Curve::P256, &point).unwrap();
        assert!(provider.import_public_key(&spki, Curve::Secp256k1).is_err());
    }

    #[test]
    fn verify_rejects_truncated_signature() {
        let provider = RustCryptoProvider;
        let (public, secret) = provider.generate_key_pair(Curve::P384).unwrap();
        let message = b"test 1234";
        let signature = provider.sign(&secret, message).unwrap();
        assert_eq!(signature.len(), 96);
        assert!(provider.verify(&public, message, &signature).unwrap());
        assert!(!provider.verify(&public, message, &signature[1..]).unwrap());
    }
}
