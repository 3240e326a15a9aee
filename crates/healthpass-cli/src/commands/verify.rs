//! Verify command implementation.

use chrono::Utc;
use healthpass_cose::{
    verify_signed_envelope, verify_with_trust_anchors, Jwk, PublicKeyMaterial, TrustAnchorSet,
    VerificationOutcome,
};
use serde_json::json;

use crate::input::read_envelope;
use crate::output::{cbor_diagnostic, format_json, print_field, truncate};

pub fn run(
    envelope: Option<String>,
    key: Option<String>,
    jwks: Option<String>,
    hex: bool,
    json_output: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = read_envelope(envelope.as_deref(), hex)?;

    let outcome = match (key, jwks) {
        (Some(path), _) => verify_signed_envelope(&bytes, &load_key(&path)?),
        (None, Some(path)) => verify_with_trust_anchors(&bytes, &load_anchors(&path)?),
        (None, None) => return Err("Either --key or --jwks is required".into()),
    };
    tracing::info!(outcome = outcome.code(), size = bytes.len(), "envelope checked");

    if json_output {
        let output = json!({
            "outcome": outcome.code(),
            "verified": outcome.is_verified(),
            "payload": outcome.payload().map(cbor_diagnostic),
            "payload_hex": outcome.payload().map(hex::encode),
            "checked_at": Utc::now().to_rfc3339(),
        });
        println!("{}", format_json(&output));
    } else {
        print_field("OUTCOME", outcome.code());
        if let VerificationOutcome::Verified(payload) = &outcome {
            print_field("PAYLOAD", &truncate(&hex::encode(payload), 64));
            print_field("SIZE", &payload.len().to_string());
        }
    }

    if strict && !outcome.is_verified() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_key(path: &str) -> Result<PublicKeyMaterial, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read key file {}: {}", path, e))?;
    let jwk: Jwk = serde_json::from_str(&text).map_err(|e| format!("Invalid JWK: {}", e))?;
    Ok(PublicKeyMaterial::from_jwk(&jwk)?)
}

fn load_anchors(path: &str) -> Result<TrustAnchorSet, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read JWKS file {}: {}", path, e))?;
    let anchors = TrustAnchorSet::from_jwks_json(&text)?;
    tracing::debug!(keys = anchors.len(), "loaded trust anchors");
    Ok(anchors)
}
