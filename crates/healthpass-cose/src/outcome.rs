//! End-to-end verification of an encoded COSE_Sign1 envelope.

use std::fmt;

use healthpass_cbor::decode;

use crate::envelope::SignedEnvelope;
use crate::errors::VerifyError;
use crate::header::{Algorithm, ProtectedHeader};
use crate::key::PublicKeyMaterial;
use crate::sig_structure::build_signed_bytes;
use crate::trust::TrustAnchorResolver;
use crate::verifier::try_verify;

/// Definitive result of verifying an envelope.
///
/// Only [`VerificationOutcome::Verified`] means the payload is authentic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The signature verifies; carries the payload bytes.
    Verified(Vec<u8>),
    /// The signature is well-formed but does not verify.
    SignatureInvalid,
    /// The signature length is zero or odd.
    SignatureShapeInvalid,
    /// The public key is missing a coordinate, mis-sized, or off the curve.
    KeyMaterialInvalid,
    /// The bytes decode, but not to a COSE_Sign1 envelope.
    MalformedEnvelope,
    /// The bytes are not well-formed CBOR, or re-encoding failed.
    EncodingError,
    /// No trusted, unrevoked key matches the envelope's key identifier.
    UntrustedKey,
    /// The protected header names an algorithm other than ES256.
    UnsupportedAlgorithm,
}

impl VerificationOutcome {
    /// Returns `true` only for `Verified`.
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified(_))
    }

    /// The authenticated payload, if verified.
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            VerificationOutcome::Verified(payload) => Some(payload),
            _ => None,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            VerificationOutcome::Verified(_) => "verified",
            VerificationOutcome::SignatureInvalid => "signature_invalid",
            VerificationOutcome::SignatureShapeInvalid => "signature_shape_invalid",
            VerificationOutcome::KeyMaterialInvalid => "key_material_invalid",
            VerificationOutcome::MalformedEnvelope => "malformed_envelope",
            VerificationOutcome::EncodingError => "encoding_error",
            VerificationOutcome::UntrustedKey => "untrusted_key",
            VerificationOutcome::UnsupportedAlgorithm => "unsupported_algorithm",
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<VerifyError> for VerificationOutcome {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::KeyMaterialInvalid(_) => VerificationOutcome::KeyMaterialInvalid,
            VerifyError::SignatureShapeInvalid { .. } => VerificationOutcome::SignatureShapeInvalid,
            VerifyError::SignatureInvalid => VerificationOutcome::SignatureInvalid,
        }
    }
}

/// Decodes, parses and verifies an envelope against a known key.
///
/// The protected header is treated as opaque bytes.
pub fn verify_signed_envelope(
    envelope_bytes: &[u8],
    public_key: &PublicKeyMaterial,
) -> VerificationOutcome {
    match parse_envelope(envelope_bytes) {
        Ok(envelope) => verify_envelope(&envelope, public_key),
        Err(outcome) => outcome,
    }
}

/// Verifies an envelope whose key is looked up by the protected header `kid`.
///
/// The header must name ES256 (or no algorithm) and carry a UTF-8 `kid`
/// that `resolver` knows and has not revoked.
pub fn verify_with_trust_anchors<R: TrustAnchorResolver + ?Sized>(
    envelope_bytes: &[u8],
    resolver: &R,
) -> VerificationOutcome {
    let envelope = match parse_envelope(envelope_bytes) {
        Ok(envelope) => envelope,
        Err(outcome) => return outcome,
    };

    let header = match ProtectedHeader::parse(&envelope.protected_header) {
        Ok(header) => header,
        Err(err) => {
            tracing::debug!(reason = %err, "protected header rejected");
            return VerificationOutcome::MalformedEnvelope;
        }
    };

    if let Some(alg @ Algorithm::Other(_)) = header.alg {
        tracing::debug!(alg = alg.id(), "unsupported signature algorithm");
        return VerificationOutcome::UnsupportedAlgorithm;
    }

    let Some(kid) = header.kid_str() else {
        tracing::debug!("protected header has no usable kid");
        return VerificationOutcome::UntrustedKey;
    };

    let public_key = match resolver.resolve(kid) {
        Ok(key) => key,
        Err(err) => {
            tracing::debug!(reason = %err, "key not trusted");
            return VerificationOutcome::UntrustedKey;
        }
    };

    verify_envelope(&envelope, &public_key)
}

fn parse_envelope(envelope_bytes: &[u8]) -> Result<SignedEnvelope, VerificationOutcome> {
    let value = decode(envelope_bytes).map_err(|err| {
        tracing::debug!(reason = %err, "envelope is not well-formed CBOR");
        VerificationOutcome::EncodingError
    })?;
    SignedEnvelope::parse(&value).map_err(|err| {
        tracing::debug!(reason = %err, "envelope shape rejected");
        VerificationOutcome::MalformedEnvelope
    })
}

fn verify_envelope(envelope: &SignedEnvelope, public_key: &PublicKeyMaterial) -> VerificationOutcome {
    let signed_bytes = match build_signed_bytes(&envelope.protected_header, &envelope.payload) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(reason = %err, "signing input could not be encoded");
            return VerificationOutcome::EncodingError;
        }
    };

    match try_verify(public_key, &signed_bytes, &envelope.signature) {
        Ok(()) => VerificationOutcome::Verified(envelope.payload.clone()),
        Err(err) => {
            tracing::debug!(reason = %err, "signature not verified");
            err.into()
        }
    }
}
