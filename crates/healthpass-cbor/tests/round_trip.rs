use healthpass_cbor::{decode, encode, CborError, TaggedValue};
use proptest::prelude::*;

fn tagged_value() -> impl Strategy<Value = TaggedValue> {
    let leaf = prop_oneof![
        Just(TaggedValue::Null),
        any::<bool>().prop_map(TaggedValue::Boolean),
        any::<i64>().prop_map(TaggedValue::Integer),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(TaggedValue::ByteString),
        "\\PC{0,32}".prop_map(TaggedValue::TextString),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(TaggedValue::Array),
            // BTreeMap keys are unique, matching the map invariant.
            prop::collection::btree_map(any::<i64>(), inner.clone(), 0..8).prop_map(|m| {
                TaggedValue::Map(
                    m.into_iter()
                        .map(|(k, v)| (TaggedValue::Integer(k), v))
                        .collect(),
                )
            }),
            prop::collection::btree_map("[a-z]{1,8}", inner.clone(), 0..8).prop_map(|m| {
                TaggedValue::Map(
                    m.into_iter()
                        .map(|(k, v)| (TaggedValue::TextString(k), v))
                        .collect(),
                )
            }),
            (0u64..1000, inner).prop_map(|(tag, v)| TaggedValue::Tagged(tag, Box::new(v))),
        ]
    })
}

proptest! {
    /// Every value this workspace builds survives encode then decode.
    #[test]
    fn decode_inverts_encode(value in tagged_value()) {
        let bytes = encode(&value).unwrap();
        prop_assert_eq!(decode(&bytes).unwrap(), value);
    }

    /// Encoding is deterministic.
    #[test]
    fn encode_is_deterministic(value in tagged_value()) {
        prop_assert_eq!(encode(&value).unwrap(), encode(&value).unwrap());
    }

    /// Arbitrary bytes never panic the decoder.
    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&bytes);
    }

    /// Any strict prefix of a valid encoding is rejected.
    #[test]
    fn truncation_is_rejected(value in tagged_value(), cut in any::<prop::sample::Index>()) {
        let bytes = encode(&value).unwrap();
        let len = cut.index(bytes.len());
        let is_malformed = matches!(
            decode(&bytes[..len]),
            Err(CborError::MalformedEncoding { .. })
        );
        prop_assert!(is_malformed);
    }
}

#[test]
fn sig_structure_golden_bytes() {
    let value = TaggedValue::Array(vec![
        TaggedValue::from("Signature1"),
        TaggedValue::ByteString(vec![0xa1, 0x01, 0x26]),
        TaggedValue::ByteString(vec![]),
        TaggedValue::ByteString(b"hi".to_vec()),
    ]);
    assert_eq!(
        hex::encode(encode(&value).unwrap()),
        "846a5369676e61747572653143a1012640426869"
    );
}

#[test]
fn long_byte_string_uses_two_byte_length() {
    let value = TaggedValue::ByteString(vec![0u8; 300]);
    let bytes = encode(&value).unwrap();
    assert_eq!(&bytes[..3], &[0x59, 0x01, 0x2c]);
    assert_eq!(bytes.len(), 303);
    assert_eq!(decode(&bytes).unwrap(), value);
}
