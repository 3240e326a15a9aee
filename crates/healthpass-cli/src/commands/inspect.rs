//! Inspect command implementation.

use healthpass_cbor::{decode, to_diagnostic_json};
use healthpass_cose::{ProtectedHeader, SignedEnvelope};
use serde_json::json;

use crate::input::read_envelope;
use crate::output::{cbor_diagnostic, format_json};

pub fn run(envelope: Option<String>, hex: bool) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = read_envelope(envelope.as_deref(), hex)?;
    let value = decode(&bytes).map_err(|e| format!("Envelope is not valid CBOR: {}", e))?;
    let envelope =
        SignedEnvelope::parse(&value).map_err(|e| format!("Not a COSE_Sign1 envelope: {}", e))?;

    // An unreadable protected header is still shown as raw bytes.
    let protected = match ProtectedHeader::parse(&envelope.protected_header) {
        Ok(header) => json!({
            "alg": header.alg.map(|alg| alg.id()),
            "kid": header.kid_str(),
            "kid_hex": header.kid.as_deref().map(hex::encode),
        }),
        Err(e) => json!({ "error": e.to_string() }),
    };

    let output = json!({
        "protected": protected,
        "protected_hex": hex::encode(&envelope.protected_header),
        "unprotected": to_diagnostic_json(&envelope.unprotected_header),
        "payload": cbor_diagnostic(&envelope.payload),
        "payload_size": envelope.payload.len(),
        "signature_hex": hex::encode(&envelope.signature),
        "signature_size": envelope.signature.len(),
        "tagged": matches!(value, healthpass_cbor::TaggedValue::Tagged(..)),
    });

    println!("{}", format_json(&output));

    Ok(())
}
