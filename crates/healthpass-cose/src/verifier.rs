//! ECDSA P-256 / SHA-256 signature verification.
//!
//! The signature is the fixed-width `r || s` form used by COSE, split at its
//! midpoint. Every failure, including malformed keys and signatures, is a
//! typed "not verified" result; nothing here panics on attacker-controlled
//! shape.

use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::{Signature, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::errors::VerifyError;
use crate::key::{PublicKeyMaterial, COORDINATE_LEN};

/// Checks `signature` over `signed_bytes` with `public_key`.
///
/// Returns `true` only when the signature verifies.
pub fn verify(public_key: &PublicKeyMaterial, signed_bytes: &[u8], signature: &[u8]) -> bool {
    match try_verify(public_key, signed_bytes, signature) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(reason = %err, "signature not verified");
            false
        }
    }
}

/// Checks `signature` over `signed_bytes`, reporting why it did not verify.
///
/// The signature must be exactly 64 bytes (`r || s`); zero-padded halves are
/// not accepted.
pub fn try_verify(
    public_key: &PublicKeyMaterial,
    signed_bytes: &[u8],
    signature: &[u8],
) -> Result<(), VerifyError> {
    let point = public_key.to_uncompressed_point()?;
    let verifying_key = VerifyingKey::from_sec1_bytes(&point)
        .map_err(|_| VerifyError::KeyMaterialInvalid("point is not on P-256".to_string()))?;

    let digest = Sha256::digest(signed_bytes);

    check_signature_len(signature)?;
    // Splits at the midpoint and rejects r or s outside [1, n).
    let signature = Signature::from_slice(signature).map_err(|_| VerifyError::SignatureInvalid)?;

    verifying_key
        .verify_prehash(&digest, &signature)
        .map_err(|_| VerifyError::SignatureInvalid)
}

/// Empty and odd-length input is a shape error. Any other length than the
/// fixed ES256 width does not verify, so zero-padded encodings of a valid
/// signature are rejected.
fn check_signature_len(signature: &[u8]) -> Result<(), VerifyError> {
    if signature.is_empty() || signature.len() % 2 != 0 {
        return Err(VerifyError::SignatureShapeInvalid {
            len: signature.len(),
        });
    }
    if signature.len() != 2 * COORDINATE_LEN {
        return Err(VerifyError::SignatureInvalid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::ecdsa::signature::Signer;
    use p256::ecdsa::SigningKey;

    const MESSAGE: &[u8] = b"signed bytes";

    fn signing_key(seed: u8) -> SigningKey {
        SigningKey::from_slice(&[seed; 32]).unwrap()
    }

    fn public_key(key: &SigningKey) -> PublicKeyMaterial {
        let point = key.verifying_key().to_encoded_point(false);
        PublicKeyMaterial::new(point.x().unwrap().to_vec(), point.y().unwrap().to_vec())
    }

    fn sign(key: &SigningKey, message: &[u8]) -> Vec<u8> {
        let signature: Signature = key.sign(message);
        signature.to_bytes().to_vec()
    }

    #[test]
    fn verifies_valid_signature() {
        let key = signing_key(7);
        let signature = sign(&key, MESSAGE);
        assert_eq!(try_verify(&public_key(&key), MESSAGE, &signature), Ok(()));
        assert!(verify(&public_key(&key), MESSAGE, &signature));
    }

    #[test]
    fn rejects_other_message() {
        let key = signing_key(7);
        let signature = sign(&key, MESSAGE);
        assert_eq!(
            try_verify(&public_key(&key), b"other bytes", &signature),
            Err(VerifyError::SignatureInvalid)
        );
    }

    #[test]
    fn rejects_other_key() {
        let signature = sign(&signing_key(7), MESSAGE);
        assert_eq!(
            try_verify(&public_key(&signing_key(8)), MESSAGE, &signature),
            Err(VerifyError::SignatureInvalid)
        );
    }

    #[test]
    fn rejects_odd_and_empty_signatures() {
        let key = signing_key(7);
        let mut signature = sign(&key, MESSAGE);
        signature.push(0);
        assert_eq!(
            try_verify(&public_key(&key), MESSAGE, &signature),
            Err(VerifyError::SignatureShapeInvalid { len: 65 })
        );
        assert_eq!(
            try_verify(&public_key(&key), MESSAGE, &[]),
            Err(VerifyError::SignatureShapeInvalid { len: 0 })
        );
        assert!(!verify(&public_key(&key), MESSAGE, &[1, 2, 3]));
    }

    #[test]
    fn zero_padded_halves_do_not_verify() {
        let key = signing_key(7);
        let signature = sign(&key, MESSAGE);
        let mut padded = vec![0u8];
        padded.extend_from_slice(&signature[..32]);
        padded.push(0);
        padded.extend_from_slice(&signature[32..]);
        assert_eq!(
            try_verify(&public_key(&key), MESSAGE, &padded),
            Err(VerifyError::SignatureInvalid)
        );
    }

    #[test]
    fn short_even_signatures_do_not_verify() {
        let key = signing_key(7);
        let signature = sign(&key, MESSAGE);
        assert_eq!(
            try_verify(&public_key(&key), MESSAGE, &signature[..62]),
            Err(VerifyError::SignatureInvalid)
        );
    }

    #[test]
    fn oversized_halves_do_not_verify() {
        let key = signing_key(7);
        let signature = vec![0xffu8; 66];
        assert_eq!(
            try_verify(&public_key(&key), MESSAGE, &signature),
            Err(VerifyError::SignatureInvalid)
        );
    }

    #[test]
    fn zero_scalars_do_not_verify() {
        let key = signing_key(7);
        assert_eq!(
            try_verify(&public_key(&key), MESSAGE, &[0u8; 64]),
            Err(VerifyError::SignatureInvalid)
        );
    }

    #[test]
    fn rejects_point_off_curve() {
        let key = PublicKeyMaterial::new(vec![1u8; 32], vec![1u8; 32]);
        let signature = sign(&signing_key(7), MESSAGE);
        assert!(matches!(
            try_verify(&key, MESSAGE, &signature),
            Err(VerifyError::KeyMaterialInvalid(_))
        ));
    }

    #[test]
    fn rejects_mis_sized_key_before_signature_checks() {
        let key = PublicKeyMaterial::new(vec![1u8; 31], vec![1u8; 32]);
        assert!(matches!(
            try_verify(&key, MESSAGE, &[1, 2, 3]),
            Err(VerifyError::KeyMaterialInvalid(_))
        ));
    }
}
