//! Strict decoder from CBOR bytes to [`TaggedValue`].
//!
//! Accepts exactly one definite-length data item. Indefinite-length items,
//! floats, `undefined`, other simple values and integers outside `i64` are
//! rejected, as are trailing bytes. Length prefixes are checked against the
//! remaining input before anything is allocated for them.

use minicbor::data::Type;
use minicbor::Decoder;

use crate::errors::CborError;
use crate::value::TaggedValue;
use crate::MAX_DEPTH;

/// Default ceiling on input size: 64 KiB, far above any QR-encodable payload.
pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;

/// Resource limits applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum nesting depth; scalars count as depth 1 (default: [`MAX_DEPTH`]).
    pub max_depth: usize,
    /// Maximum input length in bytes (default: [`DEFAULT_MAX_INPUT_LEN`]).
    pub max_input_len: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

/// Decodes a single CBOR data item using [`DecodeLimits::default`].
///
/// # Errors
///
/// Returns [`CborError::MalformedEncoding`] for truncated, unsupported or
/// trailing input, and the limit errors from [`decode_with_limits`].
pub fn decode(bytes: &[u8]) -> Result<TaggedValue, CborError> {
    decode_with_limits(bytes, DecodeLimits::default())
}

/// Decodes a single CBOR data item under explicit limits.
pub fn decode_with_limits(bytes: &[u8], limits: DecodeLimits) -> Result<TaggedValue, CborError> {
    if bytes.len() > limits.max_input_len {
        return Err(CborError::InputTooLarge {
            size: bytes.len(),
            max: limits.max_input_len,
        });
    }

    let mut d = Decoder::new(bytes);
    let value = read_value(&mut d, &limits, 1)?;

    if d.position() != bytes.len() {
        return Err(CborError::malformed(
            d.position(),
            format!("{} trailing bytes", bytes.len() - d.position()),
        ));
    }

    Ok(value)
}

fn read_value(
    d: &mut Decoder<'_>,
    limits: &DecodeLimits,
    depth: usize,
) -> Result<TaggedValue, CborError> {
    if depth > limits.max_depth {
        return Err(CborError::DepthLimitExceeded {
            max: limits.max_depth,
        });
    }

    let offset = d.position();
    let datatype = d.datatype().map_err(|e| decode_err(offset, e))?;

    let value = match datatype {
        Type::U8
        | Type::U16
        | Type::U32
        | Type::U64
        | Type::I8
        | Type::I16
        | Type::I32
        | Type::I64 => TaggedValue::Integer(d.i64().map_err(|e| decode_err(offset, e))?),
        Type::Int => {
            return Err(CborError::malformed(offset, "integer outside i64 range"));
        }
        Type::Bytes => {
            TaggedValue::ByteString(d.bytes().map_err(|e| decode_err(offset, e))?.to_vec())
        }
        Type::String => {
            TaggedValue::TextString(d.str().map_err(|e| decode_err(offset, e))?.to_string())
        }
        Type::Array => {
            let len = definite_len(d.array(), offset)?;
            check_len(d, len, 1, offset)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(read_value(d, limits, depth + 1)?);
            }
            TaggedValue::Array(items)
        }
        Type::Map => {
            let len = definite_len(d.map(), offset)?;
            check_len(d, len, 2, offset)?;
            let mut entries: Vec<(TaggedValue, TaggedValue)> = Vec::with_capacity(len);
            let mut key_offsets = Vec::with_capacity(len);
            for _ in 0..len {
                key_offsets.push(d.position());
                let key = read_value(d, limits, depth + 1)?;
                let value = read_value(d, limits, depth + 1)?;
                entries.push((key, value));
            }
            check_unique_keys(&entries, &key_offsets)?;
            TaggedValue::Map(entries)
        }
        Type::Tag => {
            let tag = d.tag().map_err(|e| decode_err(offset, e))?;
            let inner = read_value(d, limits, depth + 1)?;
            TaggedValue::Tagged(tag.as_u64(), Box::new(inner))
        }
        Type::Bool => TaggedValue::Boolean(d.bool().map_err(|e| decode_err(offset, e))?),
        Type::Null => {
            d.null().map_err(|e| decode_err(offset, e))?;
            TaggedValue::Null
        }
        Type::BytesIndef | Type::StringIndef | Type::ArrayIndef | Type::MapIndef => {
            return Err(CborError::malformed(
                offset,
                "indefinite-length items are not supported",
            ));
        }
        other => {
            return Err(CborError::malformed(
                offset,
                format!("unsupported data type {other:?}"),
            ));
        }
    };

    tracing::trace!(offset, kind = value.kind(), "decoded item");
    Ok(value)
}

fn definite_len(
    header: Result<Option<u64>, minicbor::decode::Error>,
    offset: usize,
) -> Result<usize, CborError> {
    match header.map_err(|e| decode_err(offset, e))? {
        Some(len) => usize::try_from(len)
            .map_err(|_| CborError::malformed(offset, format!("length {len} out of range"))),
        None => Err(CborError::malformed(
            offset,
            "indefinite-length items are not supported",
        )),
    }
}

/// Each array item needs at least one byte and each map entry at least two,
/// so a count above that bound cannot be satisfied by the remaining input.
fn check_len(
    d: &Decoder<'_>,
    len: usize,
    min_item_size: usize,
    offset: usize,
) -> Result<(), CborError> {
    let remaining = d.input().len() - d.position();
    match len.checked_mul(min_item_size) {
        Some(needed) if needed <= remaining => Ok(()),
        _ => Err(CborError::malformed(
            offset,
            format!("length {len} exceeds remaining input of {remaining} bytes"),
        )),
    }
}

/// Sorts keys by reference so duplicate detection stays `O(n log n)` for
/// maps with thousands of entries. Reports the later of two equal keys.
fn check_unique_keys(
    entries: &[(TaggedValue, TaggedValue)],
    key_offsets: &[usize],
) -> Result<(), CborError> {
    let mut keys: Vec<(&TaggedValue, usize)> = entries
        .iter()
        .map(|(key, _)| key)
        .zip(key_offsets.iter().copied())
        .collect();
    keys.sort_unstable();
    match keys.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        Some(pair) => Err(CborError::malformed(pair[1].1, "duplicate map key")),
        None => Ok(()),
    }
}

fn decode_err(offset: usize, err: minicbor::decode::Error) -> CborError {
    CborError::malformed(offset, err.to_string())
}
