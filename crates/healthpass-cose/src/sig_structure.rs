//! Reconstruction of the COSE_Sign1 signing input.

use healthpass_cbor::{encode, CborError, TaggedValue};

/// Context string for single-signer COSE signatures.
pub const SIGNATURE1_CONTEXT: &str = "Signature1";

/// Builds the bytes that were hashed and signed at issuance.
///
/// Encodes `["Signature1", protected_header, h'', payload]`: the external
/// additional authenticated data is always the empty byte string. Any change
/// to item order or types breaks every signature.
pub fn build_signed_bytes(protected_header: &[u8], payload: &[u8]) -> Result<Vec<u8>, CborError> {
    let sig_structure = TaggedValue::Array(vec![
        TaggedValue::TextString(SIGNATURE1_CONTEXT.to_string()),
        TaggedValue::ByteString(protected_header.to_vec()),
        TaggedValue::ByteString(Vec::new()),
        TaggedValue::ByteString(payload.to_vec()),
    ]);
    encode(&sig_structure)
}
