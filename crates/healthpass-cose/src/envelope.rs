//! COSE_Sign1 envelope view.

use healthpass_cbor::TaggedValue;

use crate::errors::EnvelopeError;

/// CBOR tag identifying a COSE_Sign1 message.
pub const COSE_SIGN1_TAG: u64 = 18;

/// Number of items in a COSE_Sign1 array.
pub const ENVELOPE_LEN: usize = 4;

/// Typed view over the 4-element COSE_Sign1 array
/// `[protected, unprotected, payload, signature]`.
///
/// The protected header and payload are kept as the exact bytes found on the
/// wire; they are replayed unchanged into the signing input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    /// Serialized protected header map (opaque here).
    pub protected_header: Vec<u8>,
    /// Unprotected header; not covered by the signature.
    pub unprotected_header: TaggedValue,
    /// Application-defined claims (opaque here).
    pub payload: Vec<u8>,
    /// Raw signature bytes, `r || s`.
    pub signature: Vec<u8>,
}

impl SignedEnvelope {
    /// Interprets a decoded value as an envelope.
    ///
    /// A single outer COSE_Sign1 tag is unwrapped. The unprotected header may
    /// be a map or, permissively, a byte string.
    pub fn parse(value: &TaggedValue) -> Result<Self, EnvelopeError> {
        let value = match value {
            TaggedValue::Tagged(COSE_SIGN1_TAG, inner) => inner.as_ref(),
            TaggedValue::Tagged(tag, _) => {
                return Err(EnvelopeError::InvalidEnvelopeShape(format!(
                    "unexpected tag {tag}"
                )));
            }
            other => other,
        };

        let items = match value {
            TaggedValue::Array(items) => items,
            other => {
                return Err(EnvelopeError::InvalidEnvelopeShape(format!(
                    "expected array, found {}",
                    other.kind()
                )));
            }
        };

        let [protected, unprotected, payload, signature] = items.as_slice() else {
            return Err(EnvelopeError::InvalidEnvelopeShape(format!(
                "expected {ENVELOPE_LEN} items, found {}",
                items.len()
            )));
        };

        let protected_header = byte_string(protected, "protected header")?;
        let unprotected_header = match unprotected {
            TaggedValue::Map(_) | TaggedValue::ByteString(_) => unprotected.clone(),
            other => {
                return Err(EnvelopeError::InvalidEnvelopeShape(format!(
                    "unprotected header must be a map or byte string, found {}",
                    other.kind()
                )));
            }
        };
        let payload = byte_string(payload, "payload")?;
        let signature = byte_string(signature, "signature")?;

        Ok(Self {
            protected_header,
            unprotected_header,
            payload,
            signature,
        })
    }

    /// Rebuilds the untagged 4-element array.
    pub fn to_value(&self) -> TaggedValue {
        TaggedValue::Array(vec![
            TaggedValue::ByteString(self.protected_header.clone()),
            self.unprotected_header.clone(),
            TaggedValue::ByteString(self.payload.clone()),
            TaggedValue::ByteString(self.signature.clone()),
        ])
    }

    /// Rebuilds the array wrapped in the COSE_Sign1 tag.
    pub fn to_tagged_value(&self) -> TaggedValue {
        TaggedValue::Tagged(COSE_SIGN1_TAG, Box::new(self.to_value()))
    }
}

fn byte_string(value: &TaggedValue, field: &str) -> Result<Vec<u8>, EnvelopeError> {
    match value {
        TaggedValue::ByteString(b) => Ok(b.clone()),
        other => Err(EnvelopeError::InvalidEnvelopeShape(format!(
            "{field} must be a byte string, found {}",
            other.kind()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bstr(b: &[u8]) -> TaggedValue {
        TaggedValue::ByteString(b.to_vec())
    }

    fn valid_items() -> Vec<TaggedValue> {
        vec![
            bstr(&[0xa1, 0x01, 0x26]),
            TaggedValue::Map(vec![]),
            bstr(b"payload"),
            bstr(&[1; 64]),
        ]
    }

    fn is_shape_error(result: Result<SignedEnvelope, EnvelopeError>) -> bool {
        matches!(result, Err(EnvelopeError::InvalidEnvelopeShape(_)))
    }

    #[test]
    fn parses_untagged_envelope() {
        let envelope = SignedEnvelope::parse(&TaggedValue::Array(valid_items())).unwrap();
        assert_eq!(envelope.protected_header, vec![0xa1, 0x01, 0x26]);
        assert_eq!(envelope.payload, b"payload".to_vec());
        assert_eq!(envelope.signature.len(), 64);
    }

    #[test]
    fn unwraps_cose_sign1_tag() {
        let tagged = TaggedValue::Tagged(COSE_SIGN1_TAG, Box::new(TaggedValue::Array(valid_items())));
        let envelope = SignedEnvelope::parse(&tagged).unwrap();
        assert_eq!(envelope.to_tagged_value(), tagged);
    }

    #[test]
    fn rejects_other_tags() {
        let tagged = TaggedValue::Tagged(98, Box::new(TaggedValue::Array(valid_items())));
        assert!(is_shape_error(SignedEnvelope::parse(&tagged)));
    }

    #[test]
    fn accepts_byte_string_unprotected_header() {
        let mut items = valid_items();
        items[1] = bstr(&[]);
        assert!(SignedEnvelope::parse(&TaggedValue::Array(items)).is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        let mut items = valid_items();
        items.pop();
        assert!(is_shape_error(SignedEnvelope::parse(&TaggedValue::Array(items))));

        let mut items = valid_items();
        items.push(TaggedValue::Null);
        assert!(is_shape_error(SignedEnvelope::parse(&TaggedValue::Array(items))));

        assert!(is_shape_error(SignedEnvelope::parse(&TaggedValue::Array(vec![]))));
    }

    #[test]
    fn rejects_wrong_item_types() {
        for (index, replacement) in [
            (0, TaggedValue::Map(vec![])),
            (1, TaggedValue::Null),
            (2, TaggedValue::from("payload")),
            (3, TaggedValue::Integer(0)),
        ] {
            let mut items = valid_items();
            items[index] = replacement;
            assert!(
                is_shape_error(SignedEnvelope::parse(&TaggedValue::Array(items))),
                "item {index} accepted with wrong type"
            );
        }
    }

    #[test]
    fn rejects_non_array() {
        assert!(is_shape_error(SignedEnvelope::parse(&TaggedValue::Null)));
        assert!(is_shape_error(SignedEnvelope::parse(&bstr(b"x"))));
    }
}
