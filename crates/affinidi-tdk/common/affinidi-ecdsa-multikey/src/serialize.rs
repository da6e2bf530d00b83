//! Encodes provider key handles as Multikey text

use std::fmt;

use affinidi_multikey_encoding::{HEADER_LENGTH, KeyKind, encode_base58btc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    Curve, MultikeyError, der,
    error::Result,
    header::write_header,
    provider::{KeyHandle, Provider},
};

/// Which halves of a key pair to export
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Export the public key
    /// Default: true
    pub public_key: bool,

    /// Export the secret key, if the key pair holds one
    /// Default: false
    pub secret_key: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            public_key: true,
            secret_key: false,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        ExportOptions::default()
    }

    /// Export both the public and secret key
    pub fn key_pair() -> Self {
        ExportOptions {
            public_key: true,
            secret_key: true,
        }
    }

    pub fn with_public_key(mut self, public_key: bool) -> Self {
        self.public_key = public_key;
        self
    }

    pub fn with_secret_key(mut self, secret_key: bool) -> Self {
        self.secret_key = secret_key;
        self
    }
}

/// Multikey text of a key pair, as carried in a verification method
///
/// Either field may be absent: an export only fills what was requested, and
/// a published verification method carries no secret. The secret text is
/// wiped when the pair is dropped.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultikeyPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_multibase: Option<Zeroizing<String>>,
}

impl MultikeyPair {
    /// A pair holding only the public Multikey
    pub fn public(public_key_multibase: impl Into<String>) -> Self {
        MultikeyPair {
            public_key_multibase: Some(public_key_multibase.into()),
            secret_key_multibase: None,
        }
    }

    pub fn with_secret(mut self, secret_key_multibase: impl Into<String>) -> Self {
        self.secret_key_multibase = Some(Zeroizing::new(secret_key_multibase.into()));
        self
    }
}

impl fmt::Debug for MultikeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MultikeyPair")
            .field("public_key_multibase", &self.public_key_multibase)
            .field(
                "secret_key_multibase",
                &self.secret_key_multibase.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Serializes provider key handles to Multikey text
pub struct MultikeySerializer<'a, P: Provider> {
    provider: &'a P,
}

impl<'a, P: Provider> MultikeySerializer<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        MultikeySerializer { provider }
    }

    /// Encodes the requested halves of a key pair
    ///
    /// A secret export with no secret handle is skipped rather than failed,
    /// so a public-only key pair can always be published.
    pub fn serialize(
        &self,
        public_key: &P::PublicKey,
        secret_key: Option<&P::SecretKey>,
        options: &ExportOptions,
    ) -> Result<MultikeyPair> {
        if !options.public_key && !options.secret_key {
            return Err(MultikeyError::MissingExportTarget);
        }

        let curve = public_key.curve();
        let mut pair = MultikeyPair::default();

        if options.public_key {
            let public_raw = self.public_raw(public_key)?;
            pair.public_key_multibase = Some(encode(curve, KeyKind::Public, &public_raw));
        }

        if options.secret_key {
            match secret_key {
                Some(secret_key) => {
                    if secret_key.curve() != curve {
                        return Err(MultikeyError::HeaderMismatch {
                            public: curve,
                            secret: secret_key.curve(),
                            kind: KeyKind::Secret,
                        });
                    }
                    let secret_raw = self.secret_raw(secret_key)?;
                    pair.secret_key_multibase =
                        Some(Zeroizing::new(encode(curve, KeyKind::Secret, &secret_raw)));
                }
                None => debug!("No {curve} secret key held, exporting the public key only"),
            }
        }

        debug!(
            "Serialized {curve} multikey (public: {}, secret: {})",
            pair.public_key_multibase.is_some(),
            pair.secret_key_multibase.is_some()
        );
        Ok(pair)
    }

    /// The compressed public point, always `scalar_size + 1` bytes
    pub fn public_raw(&self, public_key: &P::PublicKey) -> Result<Vec<u8>> {
        let coordinates = self
            .provider
            .export_public_coordinates(public_key)
            .map_err(MultikeyError::provider)?;
        der::compress_point(public_key.curve(), &coordinates.x, &coordinates.y)
    }

    /// The secret scalar, left-padded to `scalar_size` bytes
    pub fn secret_raw(&self, secret_key: &P::SecretKey) -> Result<Zeroizing<Vec<u8>>> {
        let curve = secret_key.curve();
        let size = curve.descriptor().scalar_size;
        let scalar = self
            .provider
            .export_secret_scalar(secret_key)
            .map_err(MultikeyError::provider)?;

        if scalar.len() == size {
            return Ok(scalar);
        }
        if scalar.len() > size {
            return Err(MultikeyError::MalformedSecretKey {
                curve,
                expected: size,
                actual: scalar.len(),
            });
        }

        let mut padded = Zeroizing::new(vec![0u8; size]);
        padded[size - scalar.len()..].copy_from_slice(&scalar);
        Ok(padded)
    }
}

/// Prepends the header for `(curve, kind)` and multibase-encodes the result
pub(crate) fn encode(curve: Curve, kind: KeyKind, raw: &[u8]) -> String {
    let mut bytes = Zeroizing::new(vec![0u8; HEADER_LENGTH + raw.len()]);
    write_header(&mut bytes, 0, curve, kind);
    bytes[HEADER_LENGTH..].copy_from_slice(raw);
    encode_base58btc(&bytes)
}
