//! Sign command implementation (dev-tools only).
//!
//! Produces test envelopes for exercising verifiers; not for issuing real passes.

use base64::Engine;
use healthpass_cbor::{encode, from_json, TaggedValue};
use healthpass_cose::{build_signed_bytes, Algorithm, Jwk, ProtectedHeader, SignedEnvelope};
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};

use crate::input::read_bytes;

pub fn run(
    payload: Option<String>,
    key: String,
    kid: String,
    jwk_out: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scalar = hex::decode(key.trim()).map_err(|e| format!("Invalid key hex: {}", e))?;
    let signing_key =
        SigningKey::from_slice(&scalar).map_err(|_| "Key must be a 32-byte P-256 scalar")?;

    let payload_json: serde_json::Value = serde_json::from_slice(&read_bytes(payload.as_deref())?)
        .map_err(|e| format!("Invalid payload JSON: {}", e))?;
    let payload = encode(&from_json(&payload_json)?)?;

    let header = ProtectedHeader {
        alg: Some(Algorithm::Es256),
        kid: Some(kid.as_bytes().to_vec()),
    };
    let protected = encode(&header.to_value())?;

    let signed_bytes = build_signed_bytes(&protected, &payload)?;
    let signature: Signature = signing_key.sign(&signed_bytes);

    let envelope = SignedEnvelope {
        protected_header: protected,
        unprotected_header: TaggedValue::Map(Vec::new()),
        payload,
        signature: signature.to_bytes().to_vec(),
    };
    println!("{}", hex::encode(encode(&envelope.to_tagged_value())?));

    if let Some(path) = jwk_out {
        let jwk = public_jwk(&signing_key, &kid)?;
        std::fs::write(&path, serde_json::to_string_pretty(&jwk)?)
            .map_err(|e| format!("Failed to write JWK {}: {}", path, e))?;
    }

    Ok(())
}

fn public_jwk(signing_key: &SigningKey, kid: &str) -> Result<Jwk, Box<dyn std::error::Error>> {
    let point = signing_key.verifying_key().to_encoded_point(false);
    let (Some(x), Some(y)) = (point.x(), point.y()) else {
        return Err("Public key is the identity point".into());
    };
    let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    Ok(Jwk {
        kty: "EC".to_string(),
        crv: "P-256".to_string(),
        kid: Some(kid.to_string()),
        x: Some(b64.encode(x)),
        y: Some(b64.encode(y)),
    })
}
