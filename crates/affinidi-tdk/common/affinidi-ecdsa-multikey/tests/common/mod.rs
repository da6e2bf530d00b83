//! Deterministic in-memory [`Provider`] for codec tests
//!
//! Keys are byte strings derived from a counter with SHA-256, always with a
//! leading zero byte in the scalar and in X so that fixed-width padding is
//! exercised. "Signatures" are `SHA-256(point || message)`.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use affinidi_ecdsa_multikey::{Curve, KeyHandle, Provider, PublicCoordinates, der};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Error, Debug)]
pub enum FakeError {
    #[error("fake provider rejected the key: {0}")]
    Rejected(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakePublicKey {
    pub curve: Curve,
    pub point: Vec<u8>,
}

impl KeyHandle for FakePublicKey {
    fn curve(&self) -> Curve {
        self.curve
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeSecretKey {
    pub curve: Curve,
    pub scalar: Vec<u8>,
    pub point: Vec<u8>,
}

impl KeyHandle for FakeSecretKey {
    fn curve(&self) -> Curve {
        self.curve
    }
}

#[derive(Default)]
pub struct FakeProvider {
    counter: AtomicU64,
    reject_imports: bool,
}

impl FakeProvider {
    pub fn new() -> Self {
        FakeProvider::default()
    }

    /// A provider whose import operations always fail
    pub fn rejecting() -> Self {
        FakeProvider {
            counter: AtomicU64::new(0),
            reject_imports: true,
        }
    }
}

/// `length` bytes of SHA-256 output chained from `seed`, first byte zeroed
fn derive_bytes(seed: &[u8], length: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(length + 32);
    let mut block = Sha256::digest(seed).to_vec();
    while out.len() < length {
        out.extend_from_slice(&block);
        block = Sha256::digest(&block).to_vec();
    }
    out.truncate(length);
    out[0] = 0;
    out
}

fn strip_leading_zeros(bytes: &[u8]) -> Vec<u8> {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

fn fake_signature(point: &[u8], message: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(point);
    hasher.update(message);
    hasher.finalize().to_vec()
}

impl Provider for FakeProvider {
    type PublicKey = FakePublicKey;
    type SecretKey = FakeSecretKey;
    type Error = FakeError;

    fn generate_key_pair(&self, curve: Curve) -> Result<(FakePublicKey, FakeSecretKey), FakeError> {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        let size = curve.descriptor().scalar_size;

        let mut seed = count.to_be_bytes().to_vec();
        seed.extend_from_slice(curve.name().as_bytes());
        let scalar = derive_bytes(&seed, size);

        let parity = if count.is_multiple_of(2) {
            der::COMPRESSED_EVEN
        } else {
            der::COMPRESSED_ODD
        };
        let mut point = vec![parity];
        point.extend_from_slice(&derive_bytes(&scalar, size));

        Ok((
            FakePublicKey {
                curve,
                point: point.clone(),
            },
            FakeSecretKey {
                curve,
                scalar,
                point,
            },
        ))
    }

    fn export_public_coordinates(
        &self,
        key: &FakePublicKey,
    ) -> Result<PublicCoordinates, FakeError> {
        // Y only needs the right parity in its last byte
        Ok(PublicCoordinates {
            x: strip_leading_zeros(&key.point[1..]),
            y: vec![0xab, key.point[0] - der::COMPRESSED_EVEN],
        })
    }

    fn export_secret_scalar(&self, key: &FakeSecretKey) -> Result<Zeroizing<Vec<u8>>, FakeError> {
        Ok(Zeroizing::new(strip_leading_zeros(&key.scalar)))
    }

    fn import_public_key(&self, spki: &[u8], curve: Curve) -> Result<FakePublicKey, FakeError> {
        if self.reject_imports {
            return Err(FakeError::Rejected("imports disabled".into()));
        }
        let (spki_curve, point) =
            der::parse_spki(spki).map_err(|e| FakeError::Rejected(e.to_string()))?;
        if spki_curve != curve {
            return Err(FakeError::Rejected(format!(
                "SPKI is {spki_curve}, expected {curve}"
            )));
        }
        Ok(FakePublicKey {
            curve,
            point: point.to_vec(),
        })
    }

    fn import_secret_key(&self, pkcs8: &[u8], curve: Curve) -> Result<FakeSecretKey, FakeError> {
        if self.reject_imports {
            return Err(FakeError::Rejected("imports disabled".into()));
        }
        let (pkcs8_curve, scalar, point) =
            der::parse_pkcs8(pkcs8).map_err(|e| FakeError::Rejected(e.to_string()))?;
        if pkcs8_curve != curve {
            return Err(FakeError::Rejected(format!(
                "PKCS8 is {pkcs8_curve}, expected {curve}"
            )));
        }
        Ok(FakeSecretKey {
            curve,
            scalar: scalar.to_vec(),
            point: point.to_vec(),
        })
    }

    fn sign(&self, key: &FakeSecretKey, message: &[u8]) -> Result<Vec<u8>, FakeError> {
        Ok(fake_signature(&key.point, message))
    }

    fn verify(
        &self,
        key: &FakePublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, FakeError> {
        Ok(fake_signature(&key.point, message) == signature)
    }
}
