//! ECDSA Multikey key pairs
//!
//! [`EcdsaMultikey`] ties provider key handles to their Multikey text and
//! hands out signers and verifiers.
//!
//! ```
//! use affinidi_ecdsa_multikey::{Curve, EcdsaMultikey, ExportOptions, RustCryptoProvider};
//!
//! let key_pair = EcdsaMultikey::generate(RustCryptoProvider, Curve::P256).unwrap();
//! assert!(key_pair.public_key_multibase().starts_with("zDnae"));
//!
//! let exported = key_pair.export(&ExportOptions::default()).unwrap();
//! let imported = EcdsaMultikey::from_multikey(RustCryptoProvider, &exported).unwrap();
//! assert!(imported.signer().is_err());
//! ```

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    Curve, ExportOptions, MultikeyError, MultikeyPair, MultikeyParser, MultikeySerializer,
    Signer, Verifier,
    error::Result,
    provider::{KeyHandle, Provider},
};

/// Provider key handles, with or without the secret half
#[derive(Clone, Debug)]
pub enum KeyMaterial<Pk, Sk> {
    PublicOnly(Pk),
    KeyPair { public_key: Pk, secret_key: Sk },
}

impl<Pk, Sk> KeyMaterial<Pk, Sk> {
    pub fn public_key(&self) -> &Pk {
        match self {
            KeyMaterial::PublicOnly(public_key) => public_key,
            KeyMaterial::KeyPair { public_key, .. } => public_key,
        }
    }

    pub fn secret_key(&self) -> Option<&Sk> {
        match self {
            KeyMaterial::PublicOnly(_) => None,
            KeyMaterial::KeyPair { secret_key, .. } => Some(secret_key),
        }
    }

    pub fn into_parts(self) -> (Pk, Option<Sk>) {
        match self {
            KeyMaterial::PublicOnly(public_key) => (public_key, None),
            KeyMaterial::KeyPair {
                public_key,
                secret_key,
            } => (public_key, Some(secret_key)),
        }
    }
}

impl<Pk: KeyHandle, Sk> KeyMaterial<Pk, Sk> {
    pub fn curve(&self) -> Curve {
        self.public_key().curve()
    }
}

/// Raw key material without multicodec headers
#[derive(Clone)]
pub struct RawKeyPair {
    pub curve: Curve,
    /// Compressed public point, `scalar_size + 1` bytes
    pub public_key: Vec<u8>,
    /// Secret scalar, `scalar_size` bytes
    pub secret_key: Option<Zeroizing<Vec<u8>>>,
}

impl fmt::Debug for RawKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RawKeyPair")
            .field("curve", &self.curve)
            .field("public_key", &self.public_key)
            .field(
                "secret_key",
                &self.secret_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// An ECDSA key pair and its Multikey encoding
pub struct EcdsaMultikey<P: Provider> {
    provider: P,
    material: KeyMaterial<P::PublicKey, P::SecretKey>,
    public_key_multibase: String,
    secret_key_multibase: Option<Zeroizing<String>>,
}

impl<P: Provider> EcdsaMultikey<P> {
    /// Generates a new key pair on `curve`
    pub fn generate(provider: P, curve: Curve) -> Result<Self> {
        let (public_key, secret_key) = provider
            .generate_key_pair(curve)
            .map_err(MultikeyError::provider)?;
        debug!("Generated {curve} key pair");
        Self::from_key_material(
            provider,
            KeyMaterial::KeyPair {
                public_key,
                secret_key,
            },
        )
    }

    /// Imports a key pair from its Multikey text
    pub fn from_multikey(provider: P, pair: &MultikeyPair) -> Result<Self> {
        let material = MultikeyParser::new(&provider).parse(pair)?;
        Self::from_key_material(provider, material)
    }

    /// Imports a key pair from a raw compressed point and optional raw scalar
    pub fn from_raw(
        provider: P,
        curve: Curve,
        public_raw: &[u8],
        secret_raw: Option<&[u8]>,
    ) -> Result<Self> {
        let parser = MultikeyParser::new(&provider);
        let material = parser.parse_raw(curve, public_raw, secret_raw)?;
        Self::from_key_material(provider, material)
    }

    /// Wraps key handles the caller already holds
    pub fn from_key_material(
        provider: P,
        material: KeyMaterial<P::PublicKey, P::SecretKey>,
    ) -> Result<Self> {
        let pair = MultikeySerializer::new(&provider).serialize(
            material.public_key(),
            material.secret_key(),
            &ExportOptions::key_pair(),
        )?;
        let public_key_multibase = pair
            .public_key_multibase
            .ok_or(MultikeyError::MissingPublicKey)?;

        Ok(EcdsaMultikey {
            provider,
            material,
            public_key_multibase,
            secret_key_multibase: pair.secret_key_multibase,
        })
    }

    /// Exports the halves selected by `options`
    ///
    /// Requesting the secret key of a public-only key pair is not an error;
    /// the secret is simply absent from the result.
    pub fn export(&self, options: &ExportOptions) -> Result<MultikeyPair> {
        if !options.public_key && !options.secret_key {
            return Err(MultikeyError::MissingExportTarget);
        }

        Ok(MultikeyPair {
            public_key_multibase: options
                .public_key
                .then(|| self.public_key_multibase.clone()),
            secret_key_multibase: if options.secret_key {
                self.secret_key_multibase.clone()
            } else {
                None
            },
        })
    }

    /// Exports the raw compressed point and, if held, the raw secret scalar
    pub fn export_raw(&self) -> Result<RawKeyPair> {
        let serializer = MultikeySerializer::new(&self.provider);
        let public_key = serializer.public_raw(self.material.public_key())?;
        let secret_key = match self.material.secret_key() {
            Some(secret_key) => Some(serializer.secret_raw(secret_key)?),
            None => None,
        };

        Ok(RawKeyPair {
            curve: self.curve(),
            public_key,
            secret_key,
        })
    }

    pub fn curve(&self) -> Curve {
        self.material.curve()
    }

    pub fn public_key_multibase(&self) -> &str {
        &self.public_key_multibase
    }

    pub fn secret_key_multibase(&self) -> Option<&str> {
        self.secret_key_multibase.as_ref().map(|s| s.as_str())
    }

    /// The public Multikey, usable as a key fingerprint
    pub fn fingerprint(&self) -> &str {
        &self.public_key_multibase
    }

    pub fn has_secret_key(&self) -> bool {
        self.material.secret_key().is_some()
    }

    pub fn key_material(&self) -> &KeyMaterial<P::PublicKey, P::SecretKey> {
        &self.material
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fails with [`MultikeyError::MissingSecretKey`] for a public-only key pair
    pub fn signer(&self) -> Result<Signer<'_, P>> {
        let secret_key = self
            .material
            .secret_key()
            .ok_or(MultikeyError::MissingSecretKey)?;
        Ok(Signer::new(&self.provider, secret_key))
    }

    pub fn verifier(&self) -> Verifier<'_, P> {
        Verifier::new(&self.provider, self.material.public_key())
    }
}

impl<P: Provider> fmt::Debug for EcdsaMultikey<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EcdsaMultikey")
            .field("curve", &self.curve())
            .field("public_key_multibase", &self.public_key_multibase)
            .field("has_secret_key", &self.has_secret_key())
            .finish()
    }
}
