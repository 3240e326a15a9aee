//! Tagged-value model and strict CBOR codec for signed health-pass credentials.
//!
//! The decoder accepts exactly one definite-length data item and bounds every
//! length prefix against the remaining input. The encoder writes shortest-form
//! heads in caller order, which reproduces the bytes a COSE signer hashed.
//!
//! ```rust
//! use healthpass_cbor::{decode, encode, TaggedValue};
//!
//! let value = TaggedValue::Array(vec![
//!     TaggedValue::from("Signature1"),
//!     TaggedValue::ByteString(vec![]),
//! ]);
//! let bytes = encode(&value)?;
//! assert_eq!(decode(&bytes)?, value);
//! # Ok::<(), healthpass_cbor::CborError>(())
//! ```
#![deny(missing_docs)]

/// CBOR decoder and decode limits.
pub mod decode;
/// CBOR encoder.
pub mod encode;
/// Error types for codec operations.
pub mod errors;
/// JSON rendering and fixture construction.
pub mod json;
/// The tagged-value tree.
pub mod value;

/// Maximum nesting depth accepted by the encoder and, by default, the decoder.
pub const MAX_DEPTH: usize = 32;

pub use decode::{decode, decode_with_limits, DecodeLimits, DEFAULT_MAX_INPUT_LEN};
pub use encode::encode;
pub use errors::CborError;
pub use json::{from_json, to_diagnostic_json};
pub use value::TaggedValue;
