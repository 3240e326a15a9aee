//! Output formatting utilities.

use healthpass_cbor::{decode, to_diagnostic_json};
use serde_json::Value;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Renders CBOR bytes as diagnostic JSON, or `null` if they do not decode.
pub fn cbor_diagnostic(bytes: &[u8]) -> Value {
    match decode(bytes) {
        Ok(value) => to_diagnostic_json(&value),
        Err(e) => {
            tracing::debug!(error = %e, "bytes are not well-formed CBOR");
            Value::Null
        }
    }
}

/// Prints a `FIELD value` line, padded like the table headers.
pub fn print_field(name: &str, value: &str) {
    println!("{:<12} {}", name, value);
}

/// Shortens long values for table output.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
