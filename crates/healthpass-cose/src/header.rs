//! Protected header fields used to select a verification key.

use healthpass_cbor::{decode, TaggedValue};

use crate::errors::EnvelopeError;

/// COSE header label for the algorithm identifier.
pub const LABEL_ALG: i64 = 1;

/// COSE header label for the key identifier.
pub const LABEL_KID: i64 = 4;

/// COSE signature algorithms this crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// ECDSA with SHA-256 on P-256 (COSE `-7`).
    Es256,
    /// Any other registered value.
    Other(i64),
}

impl Algorithm {
    /// Maps a COSE algorithm identifier.
    pub fn from_id(id: i64) -> Self {
        match id {
            -7 => Algorithm::Es256,
            other => Algorithm::Other(other),
        }
    }

    /// Returns the COSE algorithm identifier.
    pub fn id(self) -> i64 {
        match self {
            Algorithm::Es256 => -7,
            Algorithm::Other(id) => id,
        }
    }
}

/// Fields read from a serialized protected header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtectedHeader {
    /// Label 1.
    pub alg: Option<Algorithm>,
    /// Label 4.
    pub kid: Option<Vec<u8>>,
}

impl ProtectedHeader {
    /// Decodes the protected header bytes.
    ///
    /// An empty byte string is an empty header. Otherwise the bytes must be a
    /// map; `alg` must be an integer and `kid` a byte string when present.
    pub fn parse(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }

        let value = decode(bytes)?;
        if value.as_map().is_none() {
            return Err(EnvelopeError::InvalidEnvelopeShape(format!(
                "protected header must be a map, found {}",
                value.kind()
            )));
        }

        let alg = match value.map_get(&TaggedValue::Integer(LABEL_ALG)) {
            None => None,
            Some(TaggedValue::Integer(id)) => Some(Algorithm::from_id(*id)),
            Some(other) => {
                return Err(EnvelopeError::InvalidEnvelopeShape(format!(
                    "alg must be an integer, found {}",
                    other.kind()
                )));
            }
        };

        let kid = match value.map_get(&TaggedValue::Integer(LABEL_KID)) {
            None => None,
            Some(TaggedValue::ByteString(kid)) => Some(kid.clone()),
            Some(other) => {
                return Err(EnvelopeError::InvalidEnvelopeShape(format!(
                    "kid must be a byte string, found {}",
                    other.kind()
                )));
            }
        };

        Ok(Self { alg, kid })
    }

    /// The key identifier as text, if present and valid UTF-8.
    pub fn kid_str(&self) -> Option<&str> {
        self.kid
            .as_deref()
            .and_then(|kid| std::str::from_utf8(kid).ok())
    }

    /// Builds the header map in label order (`alg`, then `kid`).
    pub fn to_value(&self) -> TaggedValue {
        let mut entries = Vec::new();
        if let Some(alg) = self.alg {
            entries.push((TaggedValue::Integer(LABEL_ALG), TaggedValue::Integer(alg.id())));
        }
        if let Some(kid) = &self.kid {
            entries.push((TaggedValue::Integer(LABEL_KID), TaggedValue::ByteString(kid.clone())));
        }
        TaggedValue::Map(entries)
    }
}
