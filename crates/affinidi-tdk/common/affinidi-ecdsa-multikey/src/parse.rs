//! Decodes Multikey text into provider key handles

use affinidi_multikey_encoding::{KeyKind, decode_base58btc};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::{
    Curve, KeyMaterial, MultikeyError, MultikeyPair, PUBLIC_KEY_FIELD, SECRET_KEY_FIELD, der,
    error::Result,
    header::split_multikey,
    provider::Provider,
};

/// Parses Multikey text and imports it through a [`Provider`]
pub struct MultikeyParser<'a, P: Provider> {
    provider: &'a P,
}

impl<'a, P: Provider> MultikeyParser<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        MultikeyParser { provider }
    }

    /// Imports `publicKeyMultibase` and, if present, `secretKeyMultibase`
    ///
    /// Both values are fully decoded and validated before the provider is
    /// called. The secret header must be the secret header of the curve the
    /// public header resolved to, otherwise the whole parse fails with
    /// [`MultikeyError::HeaderMismatch`].
    pub fn parse(&self, pair: &MultikeyPair) -> Result<KeyMaterial<P::PublicKey, P::SecretKey>> {
        let public_text = pair
            .public_key_multibase
            .as_deref()
            .ok_or(MultikeyError::MissingPublicKey)?;

        let public_bytes = decode_base58btc(public_text)
            .map_err(|e| MultikeyError::decoding(PUBLIC_KEY_FIELD, e))?;
        let (curve, kind, public_raw) = split_multikey(&public_bytes, PUBLIC_KEY_FIELD)?;
        if kind != KeyKind::Public {
            return Err(MultikeyError::UnsupportedMultikeyHeader {
                field: PUBLIC_KEY_FIELD,
                header: format!(
                    "{} is a {curve} {kind} header",
                    curve.descriptor().header(kind)
                ),
            });
        }
        debug!("Resolved {curve} public multikey");

        let secret_bytes = match pair.secret_key_multibase.as_deref() {
            Some(secret_text) => Some(Zeroizing::new(
                decode_base58btc(secret_text)
                    .map_err(|e| MultikeyError::decoding(SECRET_KEY_FIELD, e))?,
            )),
            None => None,
        };
        let secret_raw = match &secret_bytes {
            Some(bytes) => Some(secret_payload(curve, bytes)?),
            None => None,
        };

        self.import(curve, public_raw, secret_raw)
    }

    /// Imports raw key material: a compressed public point and an optional
    /// secret scalar, both without multicodec headers
    pub fn parse_raw(
        &self,
        curve: Curve,
        public_raw: &[u8],
        secret_raw: Option<&[u8]>,
    ) -> Result<KeyMaterial<P::PublicKey, P::SecretKey>> {
        self.import(curve, public_raw, secret_raw)
    }

    fn import(
        &self,
        curve: Curve,
        public_raw: &[u8],
        secret_raw: Option<&[u8]>,
    ) -> Result<KeyMaterial<P::PublicKey, P::SecretKey>> {
        let spki = der::build_spki(curve, public_raw)?;
        let pkcs8 = match secret_raw {
            Some(secret_raw) => Some(der::build_pkcs8(curve, secret_raw, public_raw)?),
            None => None,
        };

        let public_key = self
            .provider
            .import_public_key(&spki, curve)
            .map_err(MultikeyError::provider)?;

        match pkcs8 {
            Some(pkcs8) => {
                let secret_key = self
                    .provider
                    .import_secret_key(&pkcs8, curve)
                    .map_err(MultikeyError::provider)?;
                debug!("Imported {curve} key pair");
                Ok(KeyMaterial::KeyPair {
                    public_key,
                    secret_key,
                })
            }
            None => {
                debug!("Imported {curve} public key");
                Ok(KeyMaterial::PublicOnly(public_key))
            }
        }
    }
}

/// Checks a decoded secret Multikey against the public key's curve and
/// returns its raw scalar
fn secret_payload(curve: Curve, bytes: &[u8]) -> Result<&[u8]> {
    let (secret_curve, kind, raw) = split_multikey(bytes, SECRET_KEY_FIELD)?;
    if secret_curve != curve || kind != KeyKind::Secret {
        warn!(
            "Secret multikey header ({secret_curve} {kind}) doesn't belong to the {curve} public key"
        );
        return Err(MultikeyError::HeaderMismatch {
            public: curve,
            secret: secret_curve,
            kind,
        });
    }

    let expected = curve.descriptor().scalar_size;
    if raw.len() != expected {
        return Err(MultikeyError::MalformedSecretKey {
            curve,
            expected,
            actual: raw.len(),
        });
    }
    Ok(raw)
}
