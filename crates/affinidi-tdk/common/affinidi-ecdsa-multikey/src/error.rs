//! Error types for Multikey encoding and decoding

use affinidi_multikey_encoding::{EncodingError, KeyKind};
use thiserror::Error;

use crate::Curve;

#[derive(Error, Debug)]
pub enum MultikeyError {
    #[error("Unsupported curve \"{0}\"")]
    UnsupportedCurve(String),

    #[error("Unsupported multikey header in {field}: {header}")]
    UnsupportedMultikeyHeader {
        field: &'static str,
        header: String,
    },

    #[error("\"{field}\" must be a multibase, base58btc-encoded string: {source}")]
    InvalidMultibaseEncoding {
        field: &'static str,
        source: EncodingError,
    },

    #[error("\"{field}\" has an invalid base58btc payload: {source}")]
    InvalidEncoding {
        field: &'static str,
        source: EncodingError,
    },

    #[error("Malformed {curve} public key: expected {expected} bytes, got {actual}")]
    MalformedPublicKey {
        curve: Curve,
        expected: usize,
        actual: usize,
    },

    #[error("Malformed {curve} secret key: expected {expected} bytes, got {actual}")]
    MalformedSecretKey {
        curve: Curve,
        expected: usize,
        actual: usize,
    },

    #[error("The \"publicKeyMultibase\" property is required")]
    MissingPublicKey,

    #[error("Export requires specifying either \"publicKey\" or \"secretKey\"")]
    MissingExportTarget,

    #[error("\"secretKey\" is required for signing")]
    MissingSecretKey,

    #[error("Secret key header is a {kind} {secret} header, but the public key is {public}")]
    HeaderMismatch {
        public: Curve,
        secret: Curve,
        kind: KeyKind,
    },

    #[error("Unrecognized DER structure: {0}")]
    UnrecognizedDer(String),

    #[error(transparent)]
    Provider(Box<dyn std::error::Error + Send + Sync>),
}

impl MultikeyError {
    /// Wraps an error returned by a [`crate::Provider`] without reinterpreting it
    pub fn provider<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        MultikeyError::Provider(Box::new(error))
    }

    /// Attributes a multibase decoding failure to the field it came from
    pub(crate) fn decoding(field: &'static str, source: EncodingError) -> Self {
        match source {
            EncodingError::InvalidBase58(_) => MultikeyError::InvalidEncoding { field, source },
            _ => MultikeyError::InvalidMultibaseEncoding { field, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, MultikeyError>;
