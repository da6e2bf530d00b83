//! ECDSA signer and verifier bound to a key pair's curve
//!
//! The digest is fixed by the curve: SHA-256 for P-256 and secp256k1,
//! SHA-384 for P-384 and SHA-512 for P-521.

use crate::{
    Curve, MultikeyError,
    error::Result,
    provider::{KeyHandle, Provider},
};

/// Signs messages with a secret key handle
pub struct Signer<'a, P: Provider> {
    provider: &'a P,
    secret_key: &'a P::SecretKey,
}

impl<'a, P: Provider> Signer<'a, P> {
    pub fn new(provider: &'a P, secret_key: &'a P::SecretKey) -> Self {
        Signer {
            provider,
            secret_key,
        }
    }

    /// Curve name the signatures are produced on, e.g. `P-256`
    pub fn algorithm(&self) -> &'static str {
        self.secret_key.curve().name()
    }

    pub fn curve(&self) -> Curve {
        self.secret_key.curve()
    }

    /// Returns the fixed-width `r || s` signature over `message`
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.provider
            .sign(self.secret_key, message)
            .map_err(MultikeyError::provider)
    }
}

/// Verifies signatures against a public key handle
pub struct Verifier<'a, P: Provider> {
    provider: &'a P,
    public_key: &'a P::PublicKey,
}

impl<'a, P: Provider> Verifier<'a, P> {
    pub fn new(provider: &'a P, public_key: &'a P::PublicKey) -> Self {
        Verifier {
            provider,
            public_key,
        }
    }

    /// Curve name the signatures are checked on, e.g. `P-256`
    pub fn algorithm(&self) -> &'static str {
        self.public_key.curve().name()
    }

    pub fn curve(&self) -> Curve {
        self.public_key.curve()
    }

    /// `Ok(false)` for a signature that doesn't match, including one of the
    /// wrong length
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool> {
        self.provider
            .verify(self.public_key, message, signature)
            .map_err(MultikeyError::provider)
    }
}
