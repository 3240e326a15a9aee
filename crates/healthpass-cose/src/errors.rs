use healthpass_cbor::CborError;
use thiserror::Error;

/// Errors raised while interpreting a decoded value as a COSE_Sign1 envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The value is not a 4-element array of the expected item types.
    #[error("invalid envelope shape: {0}")]
    InvalidEnvelopeShape(String),
    /// A nested encoding (such as the protected header) failed to decode.
    #[error("envelope encoding error: {0}")]
    Encoding(#[from] CborError),
}

/// Reasons a signature check did not succeed.
///
/// Every variant means "not verified"; none of them is ever upgraded to success.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// Public key coordinates are missing, mis-sized, or not a curve point.
    #[error("public key material invalid: {0}")]
    KeyMaterialInvalid(String),
    /// Signature length is zero or odd.
    #[error("signature length {len} cannot be split into r and s")]
    SignatureShapeInvalid {
        /// Length of the rejected signature.
        len: usize,
    },
    /// The signature is well-formed but does not verify.
    #[error("signature does not verify")]
    SignatureInvalid,
}

/// Errors raised while loading trust anchors.
#[derive(Error, Debug)]
pub enum TrustError {
    /// The key is not an EC P-256 key.
    #[error("unsupported key type {kty}/{crv}")]
    UnsupportedKey {
        /// JWK `kty`.
        kty: String,
        /// JWK `crv`.
        crv: String,
    },
    /// The key has no `kid`.
    #[error("key has no kid")]
    MissingKeyId,
    /// A coordinate is not valid base64url.
    #[error("invalid base64url in {field}: {source}")]
    InvalidCoordinate {
        /// JWK member name.
        field: &'static str,
        /// Underlying decode error.
        source: base64::DecodeError,
    },
    /// The JWKS document is not valid JSON or has the wrong shape.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Outcome of a failed trust-anchor lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No key is registered under the identifier.
    #[error("no trust anchor for key id {0}")]
    NotFound(String),
    /// The key is registered but has been revoked.
    #[error("trust anchor {0} has been revoked")]
    Revoked(String),
}
