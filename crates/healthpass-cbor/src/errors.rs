use thiserror::Error;

/// Errors produced by the CBOR codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CborError {
    /// The byte stream is not a single well-formed, supported data item.
    #[error("malformed encoding at offset {offset}: {reason}")]
    MalformedEncoding {
        /// Byte offset where decoding stopped.
        offset: usize,
        /// Reason for rejection.
        reason: String,
    },
    /// Nesting exceeds the configured ceiling.
    #[error("nesting depth exceeds maximum {max}")]
    DepthLimitExceeded {
        /// Maximum allowed depth.
        max: usize,
    },
    /// Input is larger than the configured ceiling.
    #[error("input size {size} exceeds maximum {max}")]
    InputTooLarge {
        /// Actual input size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },
    /// The encoder failed to write.
    #[error("encoding failed: {0}")]
    Encode(String),
    /// A JSON document has no tagged-value equivalent.
    #[error("unsupported JSON: {0}")]
    UnsupportedJson(String),
}

impl CborError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        CborError::MalformedEncoding {
            offset,
            reason: reason.into(),
        }
    }
}
