//! Encoder from [`TaggedValue`] to CBOR bytes.
//!
//! Heads always use the shortest form and every item has a definite length,
//! so the output is canonical for any value built by this workspace. Array
//! and map order is written exactly as given.

use minicbor::data::Tag;
use minicbor::Encoder;

use crate::errors::CborError;
use crate::value::TaggedValue;
use crate::MAX_DEPTH;

/// Encodes a value to CBOR.
///
/// # Errors
///
/// Returns [`CborError::DepthLimitExceeded`] when the value nests deeper than
/// [`MAX_DEPTH`].
pub fn encode(value: &TaggedValue) -> Result<Vec<u8>, CborError> {
    let mut encoder = Encoder::new(Vec::new());
    write_value(&mut encoder, value, 1)?;
    Ok(encoder.into_writer())
}

fn write_value(
    e: &mut Encoder<Vec<u8>>,
    value: &TaggedValue,
    depth: usize,
) -> Result<(), CborError> {
    if depth > MAX_DEPTH {
        return Err(CborError::DepthLimitExceeded { max: MAX_DEPTH });
    }

    match value {
        TaggedValue::Integer(n) => {
            e.i64(*n).map_err(encode_err)?;
        }
        TaggedValue::ByteString(b) => {
            e.bytes(b).map_err(encode_err)?;
        }
        TaggedValue::TextString(s) => {
            e.str(s).map_err(encode_err)?;
        }
        TaggedValue::Array(items) => {
            e.array(items.len() as u64).map_err(encode_err)?;
            for item in items {
                write_value(e, item, depth + 1)?;
            }
        }
        TaggedValue::Map(entries) => {
            e.map(entries.len() as u64).map_err(encode_err)?;
            for (k, v) in entries {
                write_value(e, k, depth + 1)?;
                write_value(e, v, depth + 1)?;
            }
        }
        TaggedValue::Tagged(tag, inner) => {
            e.tag(Tag::new(*tag)).map_err(encode_err)?;
            write_value(e, inner, depth + 1)?;
        }
        TaggedValue::Boolean(b) => {
            e.bool(*b).map_err(encode_err)?;
        }
        TaggedValue::Null => {
            e.null().map_err(encode_err)?;
        }
    }
    Ok(())
}

fn encode_err<E: std::fmt::Display>(err: minicbor::encode::Error<E>) -> CborError {
    CborError::Encode(err.to_string())
}
