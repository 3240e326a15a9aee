#![allow(dead_code)]

use healthpass_cbor::{encode, TaggedValue};
use healthpass_cose::{
    build_signed_bytes, Algorithm, ProtectedHeader, PublicKeyMaterial, SignedEnvelope,
};
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};

pub const KID: &str = "key-1";

pub fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_slice(&[seed; 32]).unwrap()
}

pub fn public_key(key: &SigningKey) -> PublicKeyMaterial {
    let point = key.verifying_key().to_encoded_point(false);
    PublicKeyMaterial::new(point.x().unwrap().to_vec(), point.y().unwrap().to_vec())
}

pub fn protected_header(alg: Algorithm, kid: &str) -> Vec<u8> {
    let header = ProtectedHeader {
        alg: Some(alg),
        kid: Some(kid.as_bytes().to_vec()),
    };
    encode(&header.to_value()).unwrap()
}

/// CWT-like claims, encoded as the payload.
pub fn payload() -> Vec<u8> {
    let claims = TaggedValue::Map(vec![
        (TaggedValue::Integer(1), TaggedValue::from("did:web:issuer.example")),
        (TaggedValue::Integer(5), TaggedValue::Integer(1_635_883_530)),
        (TaggedValue::Integer(4), TaggedValue::Integer(1_951_416_330)),
        (
            TaggedValue::from("vc"),
            TaggedValue::Map(vec![(
                TaggedValue::from("credentialSubject"),
                TaggedValue::Map(vec![
                    (TaggedValue::from("givenName"), TaggedValue::from("Jack")),
                    (TaggedValue::from("familyName"), TaggedValue::from("Sparrow")),
                    (TaggedValue::from("dob"), TaggedValue::from("1960-04-16")),
                ]),
            )]),
        ),
    ]);
    encode(&claims).unwrap()
}

pub fn sign_envelope(key: &SigningKey, protected: &[u8], payload: &[u8]) -> SignedEnvelope {
    let signed_bytes = build_signed_bytes(protected, payload).unwrap();
    let signature: Signature = key.sign(&signed_bytes);
    SignedEnvelope {
        protected_header: protected.to_vec(),
        unprotected_header: TaggedValue::Map(vec![]),
        payload: payload.to_vec(),
        signature: signature.to_bytes().to_vec(),
    }
}

/// Encoded, tagged envelope signed by `key` with kid [`KID`].
pub fn envelope_bytes(key: &SigningKey) -> Vec<u8> {
    let envelope = sign_envelope(key, &protected_header(Algorithm::Es256, KID), &payload());
    encode(&envelope.to_tagged_value()).unwrap()
}
